// src/app.rs
use crate::config::{Config, SiteConfig, StoreConfig};
use crate::crawlers::CrawlerSignatures;
use crate::db::{init_db, Database};
use crate::store::{ListingStore, RestListingStore, RetryingStore, SqliteListingStore, StoreError};
use crate::upstream::{HttpUpstream, Responder, Upstream, UpstreamError};
use std::fmt;
use std::sync::Arc;

/// Schema applied to the local listing mirror at startup.
pub const SCHEMA_PATH: &str = "sql/schema.sql";

/// Everything a request handler needs. Built once at startup and shared
/// read-only by every worker.
pub struct App {
    pub site: SiteConfig,
    pub signatures: CrawlerSignatures,
    pub store: Arc<dyn ListingStore>,
    pub upstream: Box<dyn Upstream>,
}

#[derive(Debug)]
pub enum StartupError {
    Store(StoreError),
    Upstream(UpstreamError),
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupError::Store(e) => write!(f, "listing store: {e}"),
            StartupError::Upstream(e) => write!(f, "upstream client: {e}"),
        }
    }
}

impl std::error::Error for StartupError {}

/// Listing store selected by the config, wrapped in the retry policy.
/// The SQLite mirror gets its schema applied before first use.
pub fn build_store(cfg: &Config) -> Result<Arc<dyn ListingStore>, StoreError> {
    let store: Arc<dyn ListingStore> = match &cfg.store {
        StoreConfig::Rest { api_url, api_key } => Arc::new(RetryingStore::new(
            RestListingStore::new(api_url, api_key.clone(), cfg.upstream_timeout)?,
            &cfg.retry,
        )),
        StoreConfig::Sqlite { path } => {
            let db = Database::new(path.clone());
            init_db(&db, SCHEMA_PATH)?;
            Arc::new(RetryingStore::new(SqliteListingStore::new(db), &cfg.retry))
        }
    };
    Ok(store)
}

impl App {
    pub fn from_config(cfg: &Config) -> Result<Self, StartupError> {
        let store = build_store(cfg).map_err(StartupError::Store)?;

        let responder = match &cfg.prerender_url {
            Some(url) => Responder::Remote {
                url: url.clone(),
                api_key: cfg.api_key.clone(),
            },
            None => Responder::InProcess {
                store: Arc::clone(&store),
                site: cfg.site.clone(),
            },
        };
        let upstream = HttpUpstream::new(cfg.origin_url.clone(), responder, cfg.upstream_timeout)
            .map_err(StartupError::Upstream)?;

        Ok(Self {
            site: cfg.site.clone(),
            signatures: cfg.signatures.clone(),
            store,
            upstream: Box::new(upstream),
        })
    }
}
