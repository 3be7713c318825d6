pub mod listing;
pub mod preview;

pub use listing::{ListingPreview, ListingType, PropertyType, SitemapEntry};
pub use preview::PreviewMeta;
