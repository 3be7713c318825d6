// responses/text.rs
use crate::errors::ServerError;
use crate::responses::{ResultResp, CORS_HEADERS};
use astra::{Body, ResponseBuilder};

/// Short plain-text answer, e.g. a client error from the responder.
pub fn text_response(status: u16, message: &str) -> ResultResp {
    let mut builder = ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::TEXT_PLAIN_UTF_8.as_ref());
    for (name, value) in CORS_HEADERS {
        builder = builder.header(*name, *value);
    }

    builder
        .body(Body::from(message.to_string()))
        .map_err(|_| ServerError::InternalError)
}

pub fn preflight_response() -> ResultResp {
    let mut builder = ResponseBuilder::new().status(200);
    for (name, value) in CORS_HEADERS {
        builder = builder.header(*name, *value);
    }

    builder.body(Body::empty()).map_err(|_| ServerError::InternalError)
}

pub fn xml_response(document: String) -> ResultResp {
    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", "application/xml; charset=utf-8")
        .body(Body::from(document))
        .map_err(|_| ServerError::InternalError)
}
