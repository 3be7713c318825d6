pub mod html;
pub mod proxied;
pub mod text;

pub use crate::errors::ResultResp;

pub use html::no_store_html_response;
pub use proxied::{bot_response, passthrough_response};
pub use text::{preflight_response, text_response, xml_response};

/// Never let a cache reuse the response.
pub const NO_STORE: &str = "no-store, no-cache, must-revalidate";

/// Sent with every responder answer so browsers on other origins may call it.
pub const CORS_HEADERS: &[(&str, &str)] = &[
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "GET, OPTIONS"),
    (
        "Access-Control-Allow-Headers",
        "Content-Type, Authorization, X-Client-Info, Apikey",
    ),
];
