//! Server-rendered share page at `/v/{slug}`.
//!
//! The animated card lives in the frontend; this page renders the greeting
//! as plain HTML so a share link works on its own.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Html;

use crate::state::AppState;

/// GET /v/{slug}
///
/// Render a published greeting, or the not-found page for unknown and
/// unpublished slugs alike.
pub async fn view_greeting(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> (StatusCode, Html<String>) {
    match state.flow.fetch_public(&slug).await {
        Ok(template) => (StatusCode::OK, Html(render_greeting(template.question()))),
        Err(_) => (
            StatusCode::NOT_FOUND,
            Html(render_not_found(&state.config.login_url)),
        ),
    }
}

const PAGE_STYLE: &str = "body{min-height:100vh;margin:0;display:flex;align-items:center;\
justify-content:center;font-family:system-ui,sans-serif;\
background:linear-gradient(135deg,#fce7f3,#ede9fe,#fbcfe8)}\
.card{background:rgba(255,255,255,.8);padding:2rem;border-radius:1.5rem;\
max-width:28rem;text-align:center;box-shadow:0 25px 50px -12px rgba(0,0,0,.25)}\
h1{color:#db2777}a,button{display:inline-block;margin:.5rem;padding:.75rem 1.5rem;\
border:0;border-radius:.75rem;background:#ec4899;color:#fff;font-weight:600;\
text-decoration:none;font-size:1rem}";

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n<style>{PAGE_STYLE}</style>\n</head>\n\
         <body>\n<div class=\"card\">\n{body}\n</div>\n</body>\n</html>\n"
    )
}

/// The greeting card with its answer buttons.
pub fn render_greeting(question: &str) -> String {
    let question = escape_html(question);
    page(
        &question,
        &format!(
            "<div style=\"font-size:4rem\">💌</div>\n<h1>{question}</h1>\n\
             <button type=\"button\" onclick=\"this.textContent='Yay! 💖'\">Yes</button>\n\
             <button type=\"button\" onclick=\"this.style.transform='translate('+(Math.random()*200-100)+'px,'+(Math.random()*200-100)+'px)'\">No</button>"
        ),
    )
}

/// The not-found card, linking to the frontend's `login_url`.
pub fn render_not_found(login_url: &str) -> String {
    page(
        "Template Not Found",
        &format!(
            "<div style=\"font-size:4rem\">💔</div>\n<h1>Template Not Found</h1>\n\
             <p>This Valentine template doesn&#39;t exist or has been unpublished.</p>\n\
             <a href=\"{}\">Create Your Own 💝</a>",
            escape_html(login_url)
        ),
    )
}

/// Escape text for use in HTML element content and quoted attributes.
fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
