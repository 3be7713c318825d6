use crate::app::App;
use crate::config::Config;
use crate::router::handle;
use astra::Server;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod app;
mod config;
mod crawlers;
mod db;
mod domain;
mod errors;
mod intercept;
mod prerender;
mod responses;
mod router;
mod sitemap;
mod store;
mod templates;
mod upstream;


fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 1️⃣ Load and validate configuration
    let cfg = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("configuration error: {e}");
            std::process::exit(1);
        }
    };

    // 2️⃣ `sitemap <path>` writes the sitemap and exits
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let [command, rest @ ..] = args.as_slice() {
        if command == "sitemap" {
            std::process::exit(run_sitemap(&cfg, rest.first().map(String::as_str)));
        }
        tracing::error!("unknown command {command:?}; usage: listing-prerender [sitemap <path>]");
        std::process::exit(2);
    }

    // 3️⃣ Build the shared handler state
    let app = match App::from_config(&cfg) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!("startup failed: {e}");
            std::process::exit(1);
        }
    };

    // 4️⃣ Start the server
    tracing::info!(
        addr = %cfg.bind_addr,
        origin = %cfg.origin_url,
        prerender = cfg.prerender_url.as_ref().map_or("in-process", |url| url.as_str()),
        signatures = app.signatures.len(),
        "starting listing prerender proxy"
    );

    let server = Server::bind(&cfg.bind_addr).max_workers(cfg.max_workers);

    let result = server.serve(move |req, _info| match handle(req, &app) {
        Ok(resp) => resp,
        Err(err) => templates::html_error_response(err),
    });

    if let Err(e) = result {
        tracing::error!("server ended with error: {e}");
    }

    tracing::info!("server shut down cleanly");
}

fn run_sitemap(cfg: &Config, path: Option<&str>) -> i32 {
    let path = PathBuf::from(path.unwrap_or("public/sitemap.xml"));

    let store = match app::build_store(cfg) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("listing store: {e}");
            return 1;
        }
    };

    match sitemap::write_sitemap(store.as_ref(), &cfg.site, &path) {
        Ok(count) => {
            tracing::info!(path = %path.display(), urls = count, "sitemap written");
            0
        }
        Err(e) => {
            tracing::error!("sitemap generation failed: {e}");
            1
        }
    }
}
