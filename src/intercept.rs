// src/intercept.rs
use crate::app::App;
use crate::crawlers::CrawlerSignatures;
use crate::errors::{ResultResp, ServerError};
use crate::responses::{bot_response, passthrough_response};
use astra::Request;

const LISTING_PREFIX: &str = "/property/";

#[derive(Debug, PartialEq, Eq)]
pub enum Decision<'a> {
    PassThrough,
    Prerender { slug: &'a str, signature: &'a str },
}

/// Slug of a listing-detail path: `/property/<slug>` with at most one
/// trailing slash.
pub fn listing_slug(path: &str) -> Option<&str> {
    let rest = path.strip_prefix(LISTING_PREFIX)?;
    let slug = rest.strip_suffix('/').unwrap_or(rest);
    if slug.is_empty() || slug.contains('/') {
        return None;
    }
    Some(slug)
}

pub fn decide<'a>(
    method: &str,
    path: &'a str,
    user_agent: &'a str,
    signatures: &'a CrawlerSignatures,
) -> Decision<'a> {
    if method != "GET" {
        return Decision::PassThrough;
    }
    let Some(slug) = listing_slug(path) else {
        return Decision::PassThrough;
    };
    match signatures.matching(user_agent) {
        Some(signature) => Decision::Prerender { slug, signature },
        None => Decision::PassThrough,
    }
}

/// Edge filter: crawlers on listing pages get the prerendered document,
/// every other request is replayed against the application origin.
pub fn route(req: Request, app: &App) -> ResultResp {
    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let target = match decide(
        req.method().as_str(),
        req.uri().path(),
        &user_agent,
        &app.signatures,
    ) {
        Decision::PassThrough => None,
        Decision::Prerender { slug, signature } => Some((slug.to_string(), signature.to_string())),
    };

    if let Some((slug, signature)) = target {
        match app.upstream.prerender(&slug, &user_agent) {
            Ok(resp) if resp.status < 500 => {
                tracing::info!(%slug, %signature, status = resp.status, "served prerendered listing");
                return bot_response(resp);
            }
            Ok(resp) => {
                tracing::warn!(%slug, status = resp.status, "prerender responder failed, serving app shell");
            }
            Err(e) => {
                tracing::warn!(%slug, error = %e, "prerender responder unreachable, serving app shell");
            }
        }
    }

    forward(req, app)
}

fn forward(req: Request, app: &App) -> ResultResp {
    let path = req.uri().path().to_string();
    match app.upstream.forward(req) {
        Ok(resp) => {
            tracing::debug!(%path, status = resp.status, "passed through");
            passthrough_response(resp)
        }
        Err(e) => {
            tracing::error!(%path, error = %e, "origin request failed");
            Err(ServerError::BadGateway(e.to_string()))
        }
    }
}
