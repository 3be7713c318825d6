// src/upstream.rs
use crate::config::SiteConfig;
use crate::prerender::render_preview;
use crate::store::ListingStore;
use astra::Request;
use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use std::fmt;
use std::io::Read;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Headers that describe a single connection and are never forwarded.
const HOP_BY_HOP: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "proxy-connection",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
    "host",
    "content-length",
];

pub fn is_hop_by_hop(name: &str) -> bool {
    HOP_BY_HOP.iter().any(|h| name.eq_ignore_ascii_case(h))
}

#[derive(Debug)]
pub enum UpstreamError {
    Request(String),
    InvalidRequest(String),
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamError::Request(msg) => write!(f, "upstream request failed: {msg}"),
            UpstreamError::InvalidRequest(msg) => write!(f, "cannot forward request: {msg}"),
        }
    }
}

impl std::error::Error for UpstreamError {}

/// Fully buffered response from another host.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub headers: Vec<(String, Vec<u8>)>,
    pub body: Vec<u8>,
}

/// The two outbound calls the edge filter makes.
pub trait Upstream: Send + Sync {
    /// Ask the prerender responder for `slug`, on behalf of `user_agent`.
    fn prerender(&self, slug: &str, user_agent: &str) -> Result<UpstreamResponse, UpstreamError>;

    /// Replay `req` against the application origin.
    fn forward(&self, req: Request) -> Result<UpstreamResponse, UpstreamError>;
}

/// Where prerendered listing documents come from.
pub enum Responder {
    /// Rendered on the calling worker, straight from the listing store.
    InProcess {
        store: Arc<dyn ListingStore>,
        site: SiteConfig,
    },
    /// A separately deployed responder reached over HTTP.
    Remote { url: Url, api_key: Option<String> },
}

pub struct HttpUpstream {
    client: Client,
    origin_url: Url,
    responder: Responder,
}

impl HttpUpstream {
    pub fn new(
        origin_url: Url,
        responder: Responder,
        timeout: Duration,
    ) -> Result<Self, UpstreamError> {
        // Redirects go back to the caller untouched.
        let client = Client::builder()
            .redirect(Policy::none())
            .timeout(timeout)
            .build()
            .map_err(|e| UpstreamError::Request(e.to_string()))?;

        Ok(Self {
            client,
            origin_url,
            responder,
        })
    }

    /// Origin URL for the incoming path and query.
    fn origin_target(&self, path_and_query: &str) -> String {
        format!(
            "{}{}",
            self.origin_url.as_str().trim_end_matches('/'),
            path_and_query
        )
    }
}

fn collect(resp: reqwest::blocking::Response) -> Result<UpstreamResponse, UpstreamError> {
    let status = resp.status().as_u16();
    let headers = resp
        .headers()
        .iter()
        .filter(|(name, _)| !is_hop_by_hop(name.as_str()))
        .map(|(name, value)| (name.as_str().to_string(), value.as_bytes().to_vec()))
        .collect();
    let body = resp
        .bytes()
        .map_err(|e| UpstreamError::Request(e.to_string()))?
        .to_vec();

    Ok(UpstreamResponse {
        status,
        headers,
        body,
    })
}

impl Upstream for HttpUpstream {
    fn prerender(&self, slug: &str, user_agent: &str) -> Result<UpstreamResponse, UpstreamError> {
        let (url, api_key) = match &self.responder {
            Responder::InProcess { store, site } => {
                return Ok(UpstreamResponse {
                    status: 200,
                    headers: vec![(
                        "content-type".to_string(),
                        b"text/html; charset=utf-8".to_vec(),
                    )],
                    body: render_preview(slug, store.as_ref(), site)
                        .into_string()
                        .into_bytes(),
                });
            }
            Responder::Remote { url, api_key } => (url, api_key),
        };

        let mut request = self
            .client
            .get(url.clone())
            .query(&[("slug", slug)])
            .header(reqwest::header::USER_AGENT, user_agent);

        if let Some(key) = api_key {
            request = request
                .header("apikey", key.as_str())
                .header(reqwest::header::AUTHORIZATION, format!("Bearer {key}"));
        }

        let resp = request
            .send()
            .map_err(|e| UpstreamError::Request(e.to_string()))?;
        collect(resp)
    }

    fn forward(&self, req: Request) -> Result<UpstreamResponse, UpstreamError> {
        let (parts, mut body) = req.into_parts();

        let method = reqwest::Method::from_bytes(parts.method.as_str().as_bytes())
            .map_err(|e| UpstreamError::InvalidRequest(e.to_string()))?;
        let path_and_query = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");

        let mut buf = Vec::new();
        body.reader()
            .read_to_end(&mut buf)
            .map_err(|e| UpstreamError::InvalidRequest(format!("reading body: {e}")))?;

        let mut request = self
            .client
            .request(method, self.origin_target(path_and_query));
        for (name, value) in parts.headers.iter() {
            if is_hop_by_hop(name.as_str()) {
                continue;
            }
            request = request.header(name.as_str(), value.as_bytes());
        }
        if !buf.is_empty() {
            request = request.body(buf);
        }

        let resp = request
            .send()
            .map_err(|e| UpstreamError::Request(e.to_string()))?;
        collect(resp)
    }
}
