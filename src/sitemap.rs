// src/sitemap.rs
use crate::config::SiteConfig;
use crate::errors::{ResultResp, ServerError};
use crate::responses::xml_response;
use crate::store::{ListingStore, StoreError};
use crate::templates::sitemap_document;
use std::fs;
use std::path::Path;

pub fn build_sitemap(store: &dyn ListingStore, site: &SiteConfig) -> Result<String, StoreError> {
    let listings = store.active_listings()?;
    Ok(sitemap_document(site, &listings))
}

/// `GET /sitemap.xml`
pub fn respond(store: &dyn ListingStore, site: &SiteConfig) -> ResultResp {
    match build_sitemap(store, site) {
        Ok(xml) => xml_response(xml),
        Err(e) => {
            tracing::error!(error = %e, "sitemap query failed");
            Err(ServerError::StoreError(e.to_string()))
        }
    }
}

/// Write the sitemap to `path`, creating parent directories. Returns the
/// number of `<url>` entries written.
pub fn write_sitemap(
    store: &dyn ListingStore,
    site: &SiteConfig,
    path: &Path,
) -> Result<usize, Box<dyn std::error::Error>> {
    let listings = store.active_listings()?;
    let xml = sitemap_document(site, &listings);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, xml)?;

    Ok(crate::templates::pages::STATIC_PAGES.len() + listings.len())
}
