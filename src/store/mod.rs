// src/store/mod.rs
mod rest;
mod retry;
mod sqlite;

pub use rest::RestListingStore;
pub use retry::RetryingStore;
pub use sqlite::SqliteListingStore;

use crate::domain::{ListingPreview, SitemapEntry};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    Unavailable(String),
    Status(u16, String),
    Decode(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable(msg) => write!(f, "data store unavailable: {msg}"),
            StoreError::Status(code, body) => write!(f, "data store returned HTTP {code}: {body}"),
            StoreError::Decode(msg) => write!(f, "could not decode listing row: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Result of looking a listing up by slug. A miss is a normal outcome and
/// is kept apart from store failures.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Found(ListingPreview),
    NotFound,
    TransientError(StoreError),
}

impl LookupOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            LookupOutcome::Found(_) => "found",
            LookupOutcome::NotFound => "not_found",
            LookupOutcome::TransientError(_) => "store_error",
        }
    }
}

/// Read-only access to listing projections.
pub trait ListingStore: Send + Sync {
    fn find_preview(&self, slug: &str) -> LookupOutcome;

    /// Active listings, most recently updated first.
    fn active_listings(&self) -> Result<Vec<SitemapEntry>, StoreError>;
}
