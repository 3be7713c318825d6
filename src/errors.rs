// errors.rs
use astra::Response;
use std::fmt;

/// Errors raised while handling a request, either by the routing layer
/// itself or by the collaborators it calls (data store, upstream hosts).
#[derive(Debug)]
pub enum ServerError {
    StoreError(String),
    BadGateway(String),
    InternalError,
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::StoreError(msg) => write!(f, "Data store error: {msg}"),
            ServerError::BadGateway(msg) => write!(f, "Bad Gateway: {msg}"),
            ServerError::InternalError => write!(f, "Internal Server Error"),
        }
    }
}

impl std::error::Error for ServerError {}
