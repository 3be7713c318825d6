// src/config.rs
use crate::crawlers::CrawlerSignatures;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

const DEFAULT_SITE_URL: &str = "https://yhensproperty.com";
const DEFAULT_SITE_NAME: &str = "Yhen's Property";
const DEFAULT_DATABASE_PATH: &str = "listings.sqlite3";

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, reason: String },
    Signatures(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{key} must be set"),
            ConfigError::Invalid { key, reason } => write!(f, "{key} is invalid: {reason}"),
            ConfigError::Signatures(msg) => write!(f, "crawler signatures: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Public identity of the site, used for canonical URLs and fallback
/// preview metadata.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub url: Url,
    pub name: String,
    pub default_image: String,
}

impl SiteConfig {
    pub fn new(url: Url, name: impl Into<String>) -> Self {
        let default_image = join_path(&url, "Image/Hero_Villa.png");
        Self {
            url,
            name: name.into(),
            default_image,
        }
    }

    /// Site root without a trailing slash, e.g. `https://example.com`.
    pub fn root(&self) -> String {
        self.url.as_str().trim_end_matches('/').to_string()
    }

    /// Public listing page, with `slug` encoded as a single path segment.
    pub fn listing_url(&self, slug: &str) -> String {
        let mut url = self.url.clone();
        match url.path_segments_mut() {
            Ok(mut segments) => {
                segments.pop_if_empty().push("property").push(slug);
            }
            Err(()) => return format!("{}/property/{slug}", self.root()),
        }
        url.to_string()
    }
}

fn join_path(base: &Url, path: &str) -> String {
    format!("{}/{}", base.as_str().trim_end_matches('/'), path)
}

/// Where listing projections are read from.
#[derive(Debug, Clone)]
pub enum StoreConfig {
    Rest { api_url: Url, api_key: String },
    Sqlite { path: PathBuf },
}

#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub attempts: u32,
    pub backoff: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub max_workers: usize,
    pub origin_url: Url,
    /// External responder; unset means previews are rendered in-process.
    pub prerender_url: Option<Url>,
    /// Credential forwarded to the responder as `apikey` and bearer token.
    pub api_key: Option<String>,
    pub store: StoreConfig,
    pub site: SiteConfig,
    pub signatures: CrawlerSignatures,
    pub upstream_timeout: Duration,
    pub retry: RetryConfig,
}

impl Config {
    /// Load `.env` (if present) and read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_addr: SocketAddr = parse_or(
            "BIND_ADDR",
            get("BIND_ADDR"),
            SocketAddr::from(([127, 0, 0, 1], 3000)),
        )?;
        let max_workers: usize = parse_or("MAX_WORKERS", get("MAX_WORKERS"), 8)?;
        if max_workers == 0 {
            return Err(ConfigError::Invalid {
                key: "MAX_WORKERS",
                reason: "must be at least 1".into(),
            });
        }

        let origin_url = parse_url(
            "ORIGIN_URL",
            &get("ORIGIN_URL").ok_or(ConfigError::Missing("ORIGIN_URL"))?,
        )?;

        let prerender_url = get("PRERENDER_URL")
            .map(|raw| parse_url("PRERENDER_URL", &raw))
            .transpose()?;

        let api_key = get("DATA_API_KEY");
        let store = match get("DATA_API_URL") {
            Some(raw) => StoreConfig::Rest {
                api_url: parse_url("DATA_API_URL", &raw)?,
                api_key: api_key.clone().ok_or(ConfigError::Missing("DATA_API_KEY"))?,
            },
            None => StoreConfig::Sqlite {
                path: PathBuf::from(
                    get("DATABASE_PATH").unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string()),
                ),
            },
        };

        let site_url = parse_url(
            "SITE_URL",
            &get("SITE_URL").unwrap_or_else(|| DEFAULT_SITE_URL.to_string()),
        )?;
        let mut site = SiteConfig::new(
            site_url,
            get("SITE_NAME").unwrap_or_else(|| DEFAULT_SITE_NAME.to_string()),
        );
        if let Some(image) = get("SITE_DEFAULT_IMAGE") {
            site.default_image = parse_url("SITE_DEFAULT_IMAGE", &image)?.to_string();
        }

        let signatures = match get("CRAWLER_SIGNATURES_FILE") {
            Some(path) => CrawlerSignatures::from_file(&path)
                .map_err(|e| ConfigError::Signatures(e.to_string()))?,
            None => CrawlerSignatures::builtin(),
        };

        let timeout_secs: u64 = parse_or("UPSTREAM_TIMEOUT_SECS", get("UPSTREAM_TIMEOUT_SECS"), 10)?;
        let attempts: u32 = parse_or("STORE_RETRY_ATTEMPTS", get("STORE_RETRY_ATTEMPTS"), 3)?;
        if attempts == 0 {
            return Err(ConfigError::Invalid {
                key: "STORE_RETRY_ATTEMPTS",
                reason: "must be at least 1".into(),
            });
        }
        let backoff_ms: u64 = parse_or("STORE_RETRY_BACKOFF_MS", get("STORE_RETRY_BACKOFF_MS"), 200)?;

        Ok(Self {
            bind_addr,
            max_workers,
            origin_url,
            prerender_url,
            api_key,
            store,
            site,
            signatures,
            upstream_timeout: Duration::from_secs(timeout_secs),
            retry: RetryConfig {
                attempts,
                backoff: Duration::from_millis(backoff_ms),
            },
        })
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    match raw {
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

fn parse_url(key: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::Invalid {
        key,
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::Invalid {
            key,
            reason: format!("unsupported scheme {other}"),
        }),
    }
}
