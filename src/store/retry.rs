// src/store/retry.rs
use super::{ListingStore, LookupOutcome, StoreError};
use crate::config::RetryConfig;
use crate::domain::SitemapEntry;
use rand::Rng;
use std::time::{Duration, Instant};

/// Retries transient store failures with linear backoff plus jitter.
/// Hits and misses are returned as soon as they are seen.
pub struct RetryingStore<S> {
    inner: S,
    attempts: u32,
    backoff: Duration,
}

impl<S: ListingStore> RetryingStore<S> {
    pub fn new(inner: S, cfg: &RetryConfig) -> Self {
        Self {
            inner,
            attempts: cfg.attempts.max(1),
            backoff: cfg.backoff,
        }
    }

    fn pause(&self, attempt: u32) {
        if self.backoff.is_zero() {
            return;
        }
        let base = self.backoff * attempt;
        let jitter_ms = rand::thread_rng().gen_range(0..=self.backoff.as_millis() as u64 / 2);
        std::thread::sleep(base + Duration::from_millis(jitter_ms));
    }
}

impl<S: ListingStore> ListingStore for RetryingStore<S> {
    fn find_preview(&self, slug: &str) -> LookupOutcome {
        let mut attempt = 1;
        loop {
            let start = Instant::now();
            match self.inner.find_preview(slug) {
                LookupOutcome::TransientError(e) if attempt < self.attempts => {
                    tracing::warn!(
                        slug,
                        attempt,
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        error = %e,
                        "listing lookup failed, retrying"
                    );
                    self.pause(attempt);
                    attempt += 1;
                }
                outcome => return outcome,
            }
        }
    }

    fn active_listings(&self) -> Result<Vec<SitemapEntry>, StoreError> {
        let mut attempt = 1;
        loop {
            match self.inner.active_listings() {
                Err(e) if attempt < self.attempts => {
                    tracing::warn!(attempt, error = %e, "sitemap query failed, retrying");
                    self.pause(attempt);
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}
