use crate::app::App;
use crate::config::Config;
use crate::router::handle;
use crate::store::LookupOutcome;
use crate::tests::utils::{header, init_test_db, read_body, FACEBOOK_UA};
use astra::Body;
use http::{Method, Request};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::net::TcpListener;

fn config(pairs: &[(&str, &str)]) -> Config {
    let env: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key: &str| env.get(key).cloned()).expect("valid config")
}

fn get(uri: &str, user_agent: &str) -> astra::Request {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("User-Agent", user_agent)
        .body(Body::empty())
        .unwrap()
}

#[test]
fn fresh_database_path_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fresh.sqlite3");
    let cfg = config(&[
        ("ORIGIN_URL", "http://127.0.0.1:9"),
        ("DATABASE_PATH", path.to_str().unwrap()),
    ]);

    let app = App::from_config(&cfg).expect("app starts");

    assert_eq!(app.store.find_preview("anything"), LookupOutcome::NotFound);
    let resp = handle(get("/sitemap.xml", FACEBOOK_UA), &app).expect("sitemap served");
    assert_eq!(resp.status(), 200);
}

#[test]
fn default_config_renders_previews_without_calling_itself() {
    let (_dir, db) = init_test_db();

    // Stands in for this server's own address: it accepts nothing, so any
    // loopback call would leave a pending connection behind.
    let own_addr = TcpListener::bind("127.0.0.1:0").unwrap();
    own_addr.set_nonblocking(true).unwrap();
    let bind = own_addr.local_addr().unwrap().to_string();

    let cfg = config(&[
        ("BIND_ADDR", bind.as_str()),
        ("ORIGIN_URL", "http://127.0.0.1:9"),
        ("DATABASE_PATH", db.path().to_str().unwrap()),
        ("SITE_URL", "https://example.com"),
        ("SITE_NAME", "Example Realty"),
        ("UPSTREAM_TIMEOUT_SECS", "1"),
    ]);
    assert_eq!(cfg.prerender_url, None);

    let app = App::from_config(&cfg).expect("app starts");
    let resp = handle(get("/property/seaside-villa/", FACEBOOK_UA), &app).expect("Handler failed");

    assert_eq!(resp.status(), 200);
    assert_eq!(header(&resp, "x-prerender-status").as_deref(), Some("bypass"));
    assert_eq!(header(&resp, "vary").as_deref(), Some("user-agent"));
    let body = read_body(resp);
    assert!(body.contains("Seaside Villa | Example Realty"));

    match own_addr.accept() {
        Err(e) => assert_eq!(e.kind(), ErrorKind::WouldBlock),
        Ok((_, peer)) => panic!("unexpected loopback connection from {peer}"),
    }
}
