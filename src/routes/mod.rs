//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every request passes the edge guard middleware first. Requests without a
//! session cookie are redirected to `/login` before any page handler runs.
//! Page handlers then mount a `SessionContext`, which asks the remote API who
//! the cookie belongs to and may redirect again.

pub mod auth;
pub mod pages;

use axum::Router;
use axum::body::Body;
use axum::extract::State;
use axum::http::{Method, Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use tower_http::trace::TraceLayer;

use crate::guard::GuardDecision;
use crate::state::AppState;

/// Console router: auth endpoints, page shells, and the edge guard.
pub fn app(state: AppState) -> Router {
    let router = Router::new()
        .route("/login", get(auth::login_page))
        .route("/auth/login", get(auth::login_alias))
        .route("/auth/me", get(auth::me))
        .route("/auth/logout", post(auth::logout));

    pages::PAGES
        .iter()
        .fold(router, |router, (path, _)| router.route(path, get(pages::page)))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), edge_guard))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Edge route guard middleware. Checks cookie presence only; never errors.
pub(crate) async fn edge_guard(State(state): State<AppState>, request: Request<Body>, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let method = request.method().clone();
    let jar = CookieJar::from_headers(request.headers());
    let token = jar.get(&state.guard.cookie_name).map(Cookie::value);

    // Never log the token itself.
    tracing::debug!(%path, cookie_present = token.is_some_and(|t| !t.is_empty()), "edge guard");

    match state.guard.evaluate(&path, token) {
        GuardDecision::Pass => next.run(request).await,
        GuardDecision::Redirect(target) => {
            tracing::info!(%path, %method, "no session cookie, redirecting to login");
            // 307 would replay a POST against /login, which only serves GET.
            if method == Method::GET || method == Method::HEAD {
                Redirect::temporary(&target).into_response()
            } else {
                Redirect::to(&target).into_response()
            }
        }
    }
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
