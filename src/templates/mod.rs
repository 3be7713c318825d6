pub mod components;
pub mod pages;

// Re-exports for convenience
pub use components::html_error_response;
pub use pages::{preview_page, sitemap_document};
