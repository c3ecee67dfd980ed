//! Auth routes — login page, identity passthrough, logout.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use super::pages::{escape_html, render_shell};
use crate::guard::{LOGIN_PATH, SESSION_COOKIE};
use crate::session::{IdentityApi, NavbarView, RecordingNavigator, SessionFailure};
use crate::state::AppState;

fn session_token(jar: &CookieJar) -> Option<&str> {
    jar.get(SESSION_COOKIE).map(Cookie::value)
}

/// `GET /login` — sign-in page. The form posts straight to the remote auth
/// API, which sets the session cookie.
pub async fn login_page(State(state): State<AppState>) -> Html<String> {
    let form = format!(
        "<form method=\"post\" action=\"{}/auth/login\">\
         <input name=\"email\" type=\"email\" required>\
         <input name=\"password\" type=\"password\" required>\
         <button>Sign in</button></form>",
        escape_html(&state.config.api_url)
    );
    Html(render_shell("Sign in", &NavbarView::SignedOut, &form))
}

/// `GET /auth/login` — alias of the login page.
pub async fn login_alias() -> Redirect {
    Redirect::temporary(LOGIN_PATH)
}

/// `GET /auth/me` — resolve the caller's cookie against the remote API.
pub async fn me(State(state): State<AppState>, jar: CookieJar) -> Response {
    match state.identity_api(session_token(&jar)).me().await {
        Ok(user) => Json(user).into_response(),
        Err(e) => match e.failure() {
            SessionFailure::NoSession => StatusCode::UNAUTHORIZED.into_response(),
            SessionFailure::Unavailable => {
                tracing::warn!(error = %e, "identity passthrough failed");
                StatusCode::BAD_GATEWAY.into_response()
            }
        },
    }
}

/// `POST /auth/logout` — end the remote session, clear cookie, go to login.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    let navigator = Arc::new(RecordingNavigator::new("/auth/logout"));
    let session = state.session_context(session_token(&jar), navigator.clone());
    session.logout().await;

    let Some(target) = navigator.pending_redirect() else {
        return (StatusCode::BAD_GATEWAY, "logout failed").into_response();
    };

    let cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.cookie_secure)
        .max_age(Duration::ZERO);

    (jar.add(cookie), Redirect::to(&target)).into_response()
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
