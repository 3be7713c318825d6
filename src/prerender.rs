// src/prerender.rs
use crate::app::App;
use crate::config::SiteConfig;
use crate::domain::PreviewMeta;
use crate::errors::ResultResp;
use crate::responses::{no_store_html_response, text_response};
use crate::store::{ListingStore, LookupOutcome};
use crate::templates::preview_page;
use astra::Request;
use maud::Markup;

/// Path the responder is mounted on.
pub const PRERENDER_PATH: &str = "/og-page";

/// `slug` query parameter, percent-decoded. Blank counts as missing.
pub fn slug_param(req: &Request) -> Option<String> {
    let query = req.uri().query()?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "slug")
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Resolve preview metadata for `slug`. A miss and a store failure both
/// degrade to site-wide metadata, but are logged differently.
pub fn resolve_preview(slug: &str, store: &dyn ListingStore, site: &SiteConfig) -> PreviewMeta {
    let outcome = store.find_preview(slug);
    match &outcome {
        LookupOutcome::Found(listing) => {
            tracing::info!(slug, outcome = outcome.label(), "listing preview resolved");
            PreviewMeta::for_listing(listing, site)
        }
        LookupOutcome::NotFound => {
            tracing::info!(slug, outcome = outcome.label(), "no listing for slug, using site metadata");
            PreviewMeta::generic(site)
        }
        LookupOutcome::TransientError(e) => {
            tracing::warn!(
                slug,
                outcome = outcome.label(),
                error = %e,
                "listing lookup failed, using site metadata"
            );
            PreviewMeta::generic(site)
        }
    }
}

pub fn render_preview(slug: &str, store: &dyn ListingStore, site: &SiteConfig) -> Markup {
    preview_page(&resolve_preview(slug, store, site))
}

/// `GET /og-page?slug=<slug>`
pub fn respond(req: &Request, app: &App) -> ResultResp {
    let Some(slug) = slug_param(req) else {
        tracing::debug!("prerender request without slug");
        return text_response(400, "Missing slug");
    };

    no_store_html_response(render_preview(&slug, app.store.as_ref(), &app.site))
}
