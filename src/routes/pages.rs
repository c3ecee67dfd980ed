//! Console page shells.
//!
//! Each page load mounts its own `SessionContext`. If the context redirects,
//! the redirect becomes the response; otherwise a minimal HTML shell with the
//! navbar for the resolved user is returned.

use std::sync::Arc;

use axum::extract::State;
use axum::http::Uri;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::guard::SESSION_COOKIE;
use crate::session::{NavbarView, RecordingNavigator};
use crate::state::AppState;

/// Console pages: `(path, title)`.
pub const PAGES: [(&str, &str); 6] = [
    ("/", "Dashboard"),
    ("/activity", "Activities"),
    ("/inventory", "Inventory"),
    ("/team", "Team"),
    ("/calendar", "Calendar"),
    ("/team/setup-password", "Set Your Password"),
];

pub(crate) fn page_title(path: &str) -> &'static str {
    PAGES
        .iter()
        .find(|(p, _)| *p == path)
        .map_or("BookNGo", |(_, title)| *title)
}

/// `GET` any console page.
pub async fn page(State(state): State<AppState>, uri: Uri, jar: CookieJar) -> Response {
    let path = uri.path();
    let token = jar.get(SESSION_COOKIE).map(Cookie::value);
    let navigator = Arc::new(RecordingNavigator::new(path));

    let session = state.session_context(token, navigator.clone());
    session.mount().await;

    if let Some(target) = navigator.pending_redirect() {
        return Redirect::temporary(&target).into_response();
    }

    let view = NavbarView::from(&session.state());
    Html(render_shell(page_title(path), &view, "")).into_response()
}

// =============================================================================
// RENDERING
// =============================================================================

pub(crate) fn render_shell(title: &str, navbar: &NavbarView, body: &str) -> String {
    let title = escape_html(title);
    format!(
        "<!doctype html><html><head><meta charset=\"utf-8\"><title>{title} · BookNGo</title></head><body>\
         {nav}<main><h1>{title}</h1>{body}</main></body></html>",
        nav = render_navbar(navbar)
    )
}

pub(crate) fn render_navbar(view: &NavbarView) -> String {
    let links: String = view
        .links()
        .iter()
        .map(|(label, href)| format!("<a href=\"{href}\">{label}</a>"))
        .collect();
    let account = match view {
        NavbarView::Loading => "<span>Loading...</span>".to_owned(),
        NavbarView::SignedIn { name, customer_name } => {
            let labels: String = [name, customer_name]
                .into_iter()
                .flatten()
                .map(|label| format!("<span>{}</span>", escape_html(label)))
                .collect();
            format!("{labels}<form method=\"post\" action=\"/auth/logout\"><button>Logout</button></form>")
        }
        NavbarView::SignedOut => "<a href=\"/login\">Login</a>".to_owned(),
    };
    format!("<nav><a href=\"/\">BookNGo</a>{links}{account}</nav>")
}

pub(crate) fn escape_html(raw: &str) -> String {
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

#[cfg(test)]
#[path = "pages_test.rs"]
mod tests;
