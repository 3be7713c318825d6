use crate::errors::ServerError;
use crate::responses::{ResultResp, CORS_HEADERS, NO_STORE};
use astra::{Body, ResponseBuilder};
use maud::Markup;

/// HTML built from live data: uncacheable and callable cross-origin.
pub fn no_store_html_response(markup: Markup) -> ResultResp {
    let mut builder = ResponseBuilder::new()
        .status(200)
        .header("Content-Type", mime::TEXT_HTML_UTF_8.as_ref())
        .header("Cache-Control", NO_STORE);
    for (name, value) in CORS_HEADERS {
        builder = builder.header(*name, *value);
    }

    builder
        .body(Body::from(markup.into_string()))
        .map_err(|_| ServerError::InternalError)
}
