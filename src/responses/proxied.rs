// responses/proxied.rs
use crate::errors::ServerError;
use crate::responses::{ResultResp, NO_STORE};
use crate::upstream::{is_hop_by_hop, UpstreamResponse};
use astra::{Body, ResponseBuilder};

/// Marker telling operators the SPA was bypassed for a crawler.
pub const PRERENDER_MARKER: (&str, &str) = ("X-Prerender-Status", "bypass");

/// Replay an origin response as-is.
pub fn passthrough_response(upstream: UpstreamResponse) -> ResultResp {
    let mut builder = ResponseBuilder::new().status(upstream.status);
    for (name, value) in &upstream.headers {
        if is_hop_by_hop(name) {
            continue;
        }
        builder = builder.header(name.as_str(), value.as_slice());
    }

    builder
        .body(Body::from(upstream.body))
        .map_err(|_| ServerError::BadGateway("origin sent an unusable response".into()))
}

/// Responder output served to a crawler. Caching headers are replaced so a
/// shared cache never hands this page to a browser, or the SPA to a crawler.
pub fn bot_response(upstream: UpstreamResponse) -> ResultResp {
    ResponseBuilder::new()
        .status(upstream.status)
        .header("Content-Type", mime::TEXT_HTML_UTF_8.as_ref())
        .header("Cache-Control", NO_STORE)
        .header("Vary", "user-agent")
        .header(PRERENDER_MARKER.0, PRERENDER_MARKER.1)
        .body(Body::from(upstream.body))
        .map_err(|_| ServerError::InternalError)
}
