pub mod preview;
pub mod sitemap;

pub use preview::preview_page;
pub use sitemap::{sitemap_document, STATIC_PAGES};
