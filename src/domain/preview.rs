// src/domain/preview.rs
use crate::config::SiteConfig;
use crate::domain::ListingPreview;

/// Character budget for preview descriptions.
pub const DESCRIPTION_LIMIT: usize = 200;

const GENERIC_DESCRIPTION: &str =
    "Boutique Philippine real estate agency offering luxury properties for sale and rent.";

/// Resolved link-preview metadata. Values are normalized plain text;
/// HTML escaping happens at render time.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewMeta {
    pub title: String,
    pub description: String,
    pub image: String,
    pub canonical_url: String,
    pub site_name: String,
}

impl PreviewMeta {
    pub fn for_listing(listing: &ListingPreview, site: &SiteConfig) -> Self {
        let description = match listing.description_text() {
            Some(text) => truncate_chars(text, DESCRIPTION_LIMIT).to_string(),
            None => format!(
                "{} for {} in {} - {}",
                listing.property_type,
                listing.listing_type.label(),
                listing.city.as_deref().unwrap_or(""),
                site.name
            ),
        };

        Self {
            title: normalize_text(&format!("{} | {}", listing.title, site.name)),
            description: normalize_text(&description),
            image: normalize_text(listing.cover_image().unwrap_or(&site.default_image)),
            canonical_url: site.listing_url(&listing.slug),
            site_name: normalize_text(&site.name),
        }
    }

    /// Site-wide metadata used when no listing is available.
    pub fn generic(site: &SiteConfig) -> Self {
        Self {
            title: normalize_text(&format!("{} - Premium Real Estate", site.name)),
            description: GENERIC_DESCRIPTION.to_string(),
            image: normalize_text(&site.default_image),
            canonical_url: site.root(),
            site_name: normalize_text(&site.name),
        }
    }
}

/// Collapse every run of whitespace or control characters into a single
/// space and trim both ends.
pub fn normalize_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_space = false;

    for c in input.chars() {
        if c.is_whitespace() || c.is_control() {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(c);
    }

    out
}

fn truncate_chars(s: &str, limit: usize) -> &str {
    match s.char_indices().nth(limit) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
