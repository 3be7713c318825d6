// templates/pages/sitemap.rs
use crate::config::SiteConfig;
use crate::domain::SitemapEntry;
use maud::html;

pub struct StaticPage {
    pub path: &'static str,
    pub priority: &'static str,
    pub changefreq: &'static str,
}

pub const STATIC_PAGES: &[StaticPage] = &[
    StaticPage { path: "/", priority: "1.0", changefreq: "daily" },
    StaticPage { path: "/about", priority: "0.8", changefreq: "monthly" },
    StaticPage { path: "/contact", priority: "0.7", changefreq: "monthly" },
    StaticPage { path: "/sell", priority: "0.8", changefreq: "monthly" },
    StaticPage { path: "/category/buy-condos", priority: "0.7", changefreq: "daily" },
    StaticPage { path: "/category/buy-houses", priority: "0.7", changefreq: "daily" },
    StaticPage { path: "/category/buy-land", priority: "0.7", changefreq: "daily" },
    StaticPage { path: "/category/rent", priority: "0.7", changefreq: "daily" },
    StaticPage { path: "/privacy", priority: "0.3", changefreq: "yearly" },
    StaticPage { path: "/terms", priority: "0.3", changefreq: "yearly" },
];

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// sitemaps.org document: static pages first, then one entry per listing.
pub fn sitemap_document(site: &SiteConfig, listings: &[SitemapEntry]) -> String {
    let root = site.root();

    let body = html! {
        urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9" {
            @for page in STATIC_PAGES {
                url {
                    loc { (root) (page.path) }
                    changefreq { (page.changefreq) }
                    priority { (page.priority) }
                }
            }
            @for listing in listings {
                url {
                    loc { (site.listing_url(&listing.slug)) }
                    @if let Some(updated) = listing.updated_at {
                        lastmod { (updated.format("%Y-%m-%d")) }
                    }
                    changefreq { "weekly" }
                    priority { "0.8" }
                }
            }
        }
    };

    let mut doc = String::from(XML_DECLARATION);
    doc.push_str(&body.into_string());
    doc
}
