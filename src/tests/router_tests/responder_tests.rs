use crate::router::handle;
use crate::store::{ListingStore, LookupOutcome, StoreError};
use crate::domain::SitemapEntry;
use crate::tests::utils::{header, read_body, test_app, ResponderMode};
use astra::Body;
use http::{Method, Request};
use std::sync::Arc;
use scraper::{Html, Selector};

fn get(uri: &str) -> astra::Request {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("User-Agent", "Slackbot-LinkExpanding 1.0")
        .body(Body::empty())
        .unwrap()
}

fn meta_content(body: &str, selector: &str) -> String {
    let doc = Html::parse_document(body);
    let sel = Selector::parse(selector).unwrap();
    doc.select(&sel)
        .next()
        .and_then(|el| el.value().attr("content"))
        .unwrap_or_default()
        .to_string()
}

#[test]
fn renders_listing_metadata() {
    let t = test_app(ResponderMode::Loopback);

    let resp = handle(get("/og-page?slug=seaside-villa"), &t.app).expect("Handler failed");

    assert_eq!(resp.status(), 200);
    assert_eq!(header(&resp, "content-type").as_deref(), Some("text/html; charset=utf-8"));
    assert_eq!(
        header(&resp, "cache-control").as_deref(),
        Some("no-store, no-cache, must-revalidate")
    );
    assert_eq!(header(&resp, "access-control-allow-origin").as_deref(), Some("*"));

    let body = read_body(resp);
    assert_eq!(meta_content(&body, r#"meta[property="og:title"]"#), "Seaside Villa | Example Realty");
    assert_eq!(
        meta_content(&body, r#"meta[property="og:description"]"#),
        "Five bedrooms steps from the beach."
    );
    assert_eq!(
        meta_content(&body, r#"meta[property="og:url"]"#),
        "https://example.com/property/seaside-villa"
    );
    assert_eq!(
        meta_content(&body, r#"meta[http-equiv="refresh"]"#),
        "0; url=https://example.com/property/seaside-villa"
    );
}

#[test]
fn synthesizes_a_description_when_none_is_stored() {
    let t = test_app(ResponderMode::Loopback);

    let body = read_body(handle(get("/og-page?slug=bgc-studio"), &t.app).expect("Handler failed"));

    assert_eq!(
        meta_content(&body, r#"meta[name="twitter:description"]"#),
        "Apartment for Rent in Taguig - Example Realty"
    );
    assert_eq!(
        meta_content(&body, r#"meta[name="twitter:image"]"#),
        "https://example.com/Image/Hero_Villa.png"
    );
}

#[test]
fn unknown_slug_soft_fails_to_site_metadata() {
    let t = test_app(ResponderMode::Loopback);

    let resp = handle(get("/og-page?slug=ghost-house"), &t.app).expect("Handler failed");

    assert_eq!(resp.status(), 200);
    let body = read_body(resp);
    assert_eq!(
        meta_content(&body, r#"meta[property="og:title"]"#),
        "Example Realty - Premium Real Estate"
    );
    assert_eq!(meta_content(&body, r#"meta[property="og:url"]"#), "https://example.com");
}

#[test]
fn missing_slug_is_a_client_error() {
    let t = test_app(ResponderMode::Loopback);

    for uri in ["/og-page", "/og-page?slug=", "/og-page?id=seaside-villa"] {
        let resp = handle(get(uri), &t.app).expect("Handler failed");
        assert_eq!(resp.status(), 400, "{uri}");
        assert_eq!(header(&resp, "content-type").as_deref(), Some("text/plain; charset=utf-8"));
        assert_eq!(read_body(resp), "Missing slug");
    }
}

#[test]
fn preflight_is_answered() {
    let t = test_app(ResponderMode::Loopback);

    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/og-page")
        .body(Body::empty())
        .unwrap();
    let resp = handle(req, &t.app).expect("Handler failed");

    assert_eq!(resp.status(), 200);
    assert_eq!(
        header(&resp, "access-control-allow-methods").as_deref(),
        Some("GET, OPTIONS")
    );
}

#[test]
fn listing_content_is_escaped() {
    let t = test_app(ResponderMode::Loopback);

    let body = read_body(handle(get("/og-page?slug=tricky"), &t.app).expect("Handler failed"));

    assert!(body.contains(
        "<title>Tom &amp; Jerry's &lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt; &quot;Loft&quot; | Example Realty</title>"
    ));
    assert!(body.contains("Line one line two &lt;b&gt;bold&lt;/b&gt; &amp; more"));
    assert!(body.contains("https://cdn.example.com/t.jpg?a=1&amp;b=2"));
    assert!(!body.contains("<script>alert"));
    assert!(!body.contains("<b>"));

    let doc = Html::parse_document(&body);
    assert_eq!(doc.select(&Selector::parse("script").unwrap()).count(), 1);
    assert_eq!(doc.select(&Selector::parse("b").unwrap()).count(), 0);
    assert_eq!(
        meta_content(&body, r#"meta[property="og:title"]"#),
        r#"Tom & Jerry's <script>alert("x")</script> "Loft" | Example Realty"#
    );
}

/// Always fails, as an unreachable hosted store would.
struct DownStore;

impl ListingStore for DownStore {
    fn find_preview(&self, _slug: &str) -> LookupOutcome {
        LookupOutcome::TransientError(StoreError::Unavailable("connection refused".into()))
    }

    fn active_listings(&self) -> Result<Vec<SitemapEntry>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

#[test]
fn store_outage_degrades_to_site_metadata() {
    let mut t = test_app(ResponderMode::Loopback);
    t.app.store = Arc::new(DownStore);

    let resp = handle(get("/og-page?slug=seaside-villa"), &t.app).expect("Handler failed");

    assert_eq!(resp.status(), 200);
    let body = read_body(resp);
    assert_eq!(
        meta_content(&body, r#"meta[property="og:title"]"#),
        "Example Realty - Premium Real Estate"
    );
}
