//! Test helpers: a stub of the remote BookNGo auth API served on loopback.

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde_json::json;

use crate::guard::SESSION_COOKIE;

/// Scriptable stand-in for `/auth/me` and `/auth/logout`.
#[derive(Clone)]
pub struct StubAuth {
    /// Token that `/auth/me` accepts. Anything else gets a 401.
    pub valid_token: String,
    pub identity: serde_json::Value,
    pub logout_status: StatusCode,
    /// Cookie values seen by each endpoint, in arrival order.
    pub seen: Arc<Mutex<Vec<(&'static str, Option<String>)>>>,
}

impl StubAuth {
    #[must_use]
    pub fn new(valid_token: &str) -> Self {
        Self {
            valid_token: valid_token.to_owned(),
            identity: json!({ "id": 1, "name": "Jane", "customer_id": 9 }),
            logout_status: StatusCode::OK,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    #[must_use]
    pub fn with_logout_status(mut self, status: StatusCode) -> Self {
        self.logout_status = status;
        self
    }

    #[must_use]
    pub fn seen(&self) -> Vec<(&'static str, Option<String>)> {
        self.seen.lock().expect("stub mutex should lock").clone()
    }

    fn record(&self, endpoint: &'static str, jar: &CookieJar) -> Option<String> {
        let token = jar.get(SESSION_COOKIE).map(Cookie::value).map(str::to_owned);
        self.seen
            .lock()
            .expect("stub mutex should lock")
            .push((endpoint, token.clone()));
        token
    }
}

async fn stub_me(State(stub): State<StubAuth>, jar: CookieJar) -> Response {
    match stub.record("me", &jar) {
        Some(token) if token == stub.valid_token => Json(stub.identity.clone()).into_response(),
        _ => (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Unauthorized" }))).into_response(),
    }
}

async fn stub_logout(State(stub): State<StubAuth>, jar: CookieJar) -> StatusCode {
    stub.record("logout", &jar);
    stub.logout_status
}

/// Serve `app` on an ephemeral loopback port and return its base URL.
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind loopback");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server failed");
    });
    format!("http://{addr}")
}

/// Start the stub auth API and return its base URL.
pub async fn spawn_stub_auth(stub: StubAuth) -> String {
    let app = Router::new()
        .route("/auth/me", get(stub_me))
        .route("/auth/logout", post(stub_logout))
        .with_state(stub);
    serve(app).await
}

/// A base URL nothing is listening on.
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind loopback");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}

/// Start the console against `api_url` and return its base URL.
pub async fn spawn_console(api_url: &str) -> String {
    let config = crate::config::ConsoleConfig { api_url: api_url.to_owned(), ..Default::default() };
    let state = crate::state::AppState::new(config).expect("app state");
    serve(crate::routes::app(state)).await
}

/// Browser-like client that reports redirects instead of following them.
#[must_use]
pub fn browser() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("test client")
}
