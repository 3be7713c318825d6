use crate::app::App;
use crate::intercept;
use crate::prerender::{self, PRERENDER_PATH};
use crate::responses::{preflight_response, ResultResp};
use crate::sitemap;
use astra::Request;

pub fn handle(req: Request, app: &App) -> ResultResp {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    match (method.as_str(), path.as_str()) {
        // Prerendering responder
        ("OPTIONS", PRERENDER_PATH) => preflight_response(),
        ("GET", PRERENDER_PATH) => prerender::respond(&req, app),

        ("GET", "/sitemap.xml") => sitemap::respond(app.store.as_ref(), &app.site),

        // Everything else goes through the edge filter.
        _ => intercept::route(req, app),
    }
}
