// templates/pages/preview.rs
use crate::domain::PreviewMeta;
use maud::{html, Markup, PreEscaped, DOCTYPE};

/// Static document carrying link-preview tags. Browsers and crawlers that
/// follow refreshes or run scripts end up on the canonical page.
pub fn preview_page(preview: &PreviewMeta) -> Markup {
    let redirect = format!(
        "window.location.replace({});",
        script_string(&preview.canonical_url)
    );

    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="UTF-8";
                title { (preview.title) }
                meta property="og:url" content=(preview.canonical_url);
                meta property="og:type" content="website";
                meta property="og:title" content=(preview.title);
                meta property="og:description" content=(preview.description);
                meta property="og:image" content=(preview.image);
                meta property="og:image:secure_url" content=(preview.image);
                meta property="og:image:width" content="1200";
                meta property="og:image:height" content="630";
                meta property="og:image:alt" content=(preview.title);
                meta property="og:site_name" content=(preview.site_name);
                meta name="twitter:card" content="summary_large_image";
                meta name="twitter:title" content=(preview.title);
                meta name="twitter:description" content=(preview.description);
                meta name="twitter:image" content=(preview.image);
                link rel="canonical" href=(preview.canonical_url);
                meta http-equiv="refresh" content={ "0; url=" (preview.canonical_url) };
            }
            body {
                script { (PreEscaped(redirect)) }
            }
        }
    }
}

/// JSON string literal that is also safe inside a `<script>` element.
fn script_string(value: &str) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| String::from("\"/\""))
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}
