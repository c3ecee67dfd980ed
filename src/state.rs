//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers and the edge guard middleware
//! via the `State` extractor. It holds configuration, the guard policy, and
//! one pooled HTTP client for the remote API. Nothing session-related is
//! stored here: every request builds its own `SessionContext` from its own
//! cookie.

use std::sync::Arc;

use crate::config::ConsoleConfig;
use crate::guard::GuardPolicy;
use crate::session::http::{self, HttpIdentityApi};
use crate::session::{Navigator, SessionContext, SessionError};

/// Clone is required by Axum; inner fields are Arc-wrapped or cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ConsoleConfig>,
    pub guard: Arc<GuardPolicy>,
    pub http: reqwest::Client,
}

impl AppState {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: ConsoleConfig) -> Result<Self, SessionError> {
        let http = http::build_client(config.timeouts)?;
        Ok(Self { config: Arc::new(config), guard: Arc::new(GuardPolicy::default()), http })
    }

    /// Identity API acting with the caller's session token.
    #[must_use]
    pub fn identity_api(&self, token: Option<&str>) -> HttpIdentityApi {
        HttpIdentityApi::new(self.http.clone(), self.config.api_url.clone()).with_session_token(token)
    }

    /// Fresh session context for one page load.
    #[must_use]
    pub fn session_context(&self, token: Option<&str>, navigator: Arc<dyn Navigator>) -> SessionContext {
        SessionContext::new(Arc::new(self.identity_api(token)), navigator)
    }
}
