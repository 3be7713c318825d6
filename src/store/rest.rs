// src/store/rest.rs
use super::{ListingStore, LookupOutcome, StoreError};
use crate::domain::{ListingPreview, SitemapEntry};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use std::time::Duration;
use url::Url;

const PREVIEW_COLUMNS: &str = "title,description,images,type,listing_type,city,slug";
const SITEMAP_COLUMNS: &str = "slug,updated_at";

/// Reads the `properties` table through a PostgREST-style HTTP interface.
pub struct RestListingStore {
    client: Client,
    table_url: String,
    api_key: String,
}

impl RestListingStore {
    pub fn new(api_url: &Url, api_key: String, timeout: Duration) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(Self {
            client,
            table_url: format!("{}/rest/v1/properties", api_url.as_str().trim_end_matches('/')),
            api_key,
        })
    }

    fn auth_headers(&self) -> Result<HeaderMap, StoreError> {
        let invalid = |_| StoreError::Unavailable("API key is not a valid header value".into());

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert("apikey", HeaderValue::from_str(&self.api_key).map_err(invalid)?);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key)).map_err(invalid)?,
        );
        Ok(headers)
    }

    fn get(&self, query: &[(&str, &str)]) -> Result<(u16, String), StoreError> {
        let resp = self
            .client
            .get(&self.table_url)
            .headers(self.auth_headers()?)
            .query(query)
            .send()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok((status, body))
    }
}

impl ListingStore for RestListingStore {
    fn find_preview(&self, slug: &str) -> LookupOutcome {
        let filter = format!("eq.{slug}");
        let query = [
            ("select", PREVIEW_COLUMNS),
            ("slug", filter.as_str()),
            ("limit", "1"),
        ];

        match self.get(&query) {
            Ok((status, body)) => parse_preview_response(status, &body),
            Err(e) => LookupOutcome::TransientError(e),
        }
    }

    fn active_listings(&self) -> Result<Vec<SitemapEntry>, StoreError> {
        let query = [
            ("select", SITEMAP_COLUMNS),
            ("status", "eq.active"),
            ("order", "updated_at.desc"),
        ];

        let (status, body) = self.get(&query)?;
        check_status(status, &body)?;
        serde_json::from_str(&body).map_err(|e| StoreError::Decode(e.to_string()))
    }
}

fn check_status(status: u16, body: &str) -> Result<(), StoreError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        let snippet: String = body.chars().take(200).collect();
        Err(StoreError::Status(status, snippet))
    }
}

/// Interpret a `select ... limit 1` response body.
pub(crate) fn parse_preview_response(status: u16, body: &str) -> LookupOutcome {
    if let Err(e) = check_status(status, body) {
        return LookupOutcome::TransientError(e);
    }

    match serde_json::from_str::<Vec<ListingPreview>>(body) {
        Ok(rows) => match rows.into_iter().next() {
            Some(listing) => LookupOutcome::Found(listing),
            None => LookupOutcome::NotFound,
        },
        Err(e) => LookupOutcome::TransientError(StoreError::Decode(e.to_string())),
    }
}
