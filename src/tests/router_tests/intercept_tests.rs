use crate::router::handle;
use crate::tests::utils::{
    header, read_body, test_app, ResponderMode, BROWSER_UA, FACEBOOK_UA, SPA_SHELL,
};
use astra::Body;
use http::{Method, Request};

fn get(uri: &str, user_agent: &str) -> astra::Request {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("User-Agent", user_agent)
        .body(Body::empty())
        .unwrap()
}

#[test]
fn browsers_on_listing_pages_get_the_app_shell() {
    let t = test_app(ResponderMode::Loopback);

    let resp = handle(get("/property/seaside-villa/", BROWSER_UA), &t.app).expect("Handler failed");

    assert_eq!(resp.status(), 200);
    assert_eq!(header(&resp, "cache-control").as_deref(), Some("public, max-age=3600"));
    assert_eq!(header(&resp, "etag").as_deref(), Some("\"shell-v1\""));
    assert_eq!(header(&resp, "x-prerender-status"), None);
    assert_eq!(read_body(resp), SPA_SHELL);

    let calls = t.calls.lock().unwrap();
    assert!(calls.prerendered.is_empty());
    assert_eq!(calls.forwarded.len(), 1);
    assert_eq!(calls.forwarded[0].path_and_query, "/property/seaside-villa/");
}

#[test]
fn crawlers_elsewhere_on_the_site_pass_through() {
    let t = test_app(ResponderMode::Loopback);

    for uri in ["/", "/about", "/category/rent?page=2", "/property/", "/property/seaside-villa/photos"] {
        let resp = handle(get(uri, FACEBOOK_UA), &t.app).expect("Handler failed");
        assert_eq!(read_body(resp), SPA_SHELL, "{uri}");
    }

    let calls = t.calls.lock().unwrap();
    assert!(calls.prerendered.is_empty());
    let forwarded: Vec<&str> = calls
        .forwarded
        .iter()
        .map(|f| f.path_and_query.as_str())
        .collect();
    assert_eq!(
        forwarded,
        vec!["/", "/about", "/category/rent?page=2", "/property/", "/property/seaside-villa/photos"]
    );
}

#[test]
fn pass_through_keeps_method_headers_and_body() {
    let t = test_app(ResponderMode::Loopback);

    let req = Request::builder()
        .method(Method::POST)
        .uri("/property/seaside-villa?ref=share")
        .header("User-Agent", FACEBOOK_UA)
        .header("Cookie", "session=abc")
        .header("Connection", "keep-alive")
        .body(Body::from(b"inquiry=1".to_vec()))
        .unwrap();

    handle(req, &t.app).expect("Handler failed");

    let calls = t.calls.lock().unwrap();
    assert!(calls.prerendered.is_empty(), "only GET is intercepted");
    let fwd = &calls.forwarded[0];
    assert_eq!(fwd.method, "POST");
    assert_eq!(fwd.path_and_query, "/property/seaside-villa?ref=share");
    assert_eq!(fwd.body, b"inquiry=1");
    assert!(fwd.headers.iter().any(|(k, v)| k == "cookie" && v == "session=abc"));
}

#[test]
fn crawlers_on_listing_pages_get_the_preview() {
    let t = test_app(ResponderMode::Loopback);

    let resp = handle(get("/property/seaside-villa", FACEBOOK_UA), &t.app).expect("Handler failed");

    assert_eq!(resp.status(), 200);
    assert_eq!(header(&resp, "content-type").as_deref(), Some("text/html; charset=utf-8"));
    assert_eq!(
        header(&resp, "cache-control").as_deref(),
        Some("no-store, no-cache, must-revalidate")
    );
    assert_eq!(header(&resp, "vary").as_deref(), Some("user-agent"));
    assert_eq!(header(&resp, "x-prerender-status").as_deref(), Some("bypass"));

    let body = read_body(resp);
    assert!(body.contains("<title>Seaside Villa | Example Realty</title>"));
    assert!(body.contains(r#"content="https://cdn.example.com/villa-1.jpg""#));
    assert!(!body.contains("villa-2.jpg"));

    let calls = t.calls.lock().unwrap();
    assert!(calls.forwarded.is_empty());
    assert_eq!(
        calls.prerendered,
        vec![("seaside-villa".to_string(), FACEBOOK_UA.to_string())]
    );
}

#[test]
fn unknown_listing_still_gets_a_generic_preview() {
    let t = test_app(ResponderMode::Loopback);

    let resp = handle(get("/property/no-such-home/", "Twitterbot/1.0"), &t.app).expect("Handler failed");

    assert_eq!(resp.status(), 200);
    assert_eq!(header(&resp, "vary").as_deref(), Some("user-agent"));
    let body = read_body(resp);
    assert!(body.contains("<title>Example Realty - Premium Real Estate</title>"));
    assert!(body.contains("https://example.com/Image/Hero_Villa.png"));
}

#[test]
fn unreachable_responder_falls_back_to_the_app_shell() {
    let t = test_app(ResponderMode::Unreachable);

    let resp = handle(get("/property/seaside-villa/", FACEBOOK_UA), &t.app).expect("Handler failed");

    assert_eq!(resp.status(), 200);
    assert_eq!(header(&resp, "x-prerender-status"), None);
    assert_eq!(read_body(resp), SPA_SHELL);

    let calls = t.calls.lock().unwrap();
    assert_eq!(calls.prerendered.len(), 1);
    assert_eq!(calls.forwarded.len(), 1);
}

#[test]
fn failing_responder_falls_back_to_the_app_shell() {
    let t = test_app(ResponderMode::ServerError);

    let resp = handle(get("/property/seaside-villa/", FACEBOOK_UA), &t.app).expect("Handler failed");

    assert_eq!(read_body(resp), SPA_SHELL);
}
