//! Session context — authoritative "who is logged in" for one page load.
//!
//! DESIGN
//! ======
//! A `SessionContext` is built per page load from two injected seams: an
//! `IdentityApi` that resolves the session cookie against the remote auth
//! API, and a `Navigator` that knows the current path and accepts redirects.
//! Consumers receive the context explicitly; there is no ambient global.
//!
//! The edge guard (`crate::guard`) only checks that a cookie exists. This
//! layer is where a session is actually accepted or refused.
//!
//! SEQUENCING
//! ==========
//! Every identity request takes a number from a monotonically increasing
//! counter. A response is applied only if no newer request has been issued
//! since; older responses are dropped. A successful logout also advances the
//! counter so a resolution still in flight cannot bring the user back.
//!
//! ERROR HANDLING
//! ==============
//! Resolution and logout failures are logged and swallowed. Any failed
//! resolution leaves the session unauthenticated (and redirects), but the
//! state records whether the API refused the session or was unreachable.

pub mod http;
pub mod navigator;
pub mod types;

use std::sync::{Arc, Mutex, MutexGuard};

pub use navigator::{Navigator, RecordingNavigator};
pub use types::{Access, Identity, IdentityId, NavbarView, SessionError, SessionFailure, SessionState, SessionStatus};

use crate::guard::LOGIN_PATH;

/// Paths that stay reachable when the session resolves to no user.
pub const PUBLIC_ROUTES: [&str; 1] = ["/team/setup-password"];

/// Remote session resolver.
#[async_trait::async_trait]
pub trait IdentityApi: Send + Sync {
    /// Resolve the caller's session to an identity (`GET /auth/me`).
    async fn me(&self) -> Result<Identity, SessionError>;

    /// End the caller's session on the server (`POST /auth/logout`).
    async fn logout(&self) -> Result<(), SessionError>;
}

// =============================================================================
// CONTEXT
// =============================================================================

pub struct SessionContext {
    api: Arc<dyn IdentityApi>,
    navigator: Arc<dyn Navigator>,
    inner: Mutex<Inner>,
}

struct Inner {
    state: SessionState,
    /// Sequence number of the most recently issued identity request.
    issued: u64,
    mounted: bool,
}

impl SessionContext {
    #[must_use]
    pub fn new(api: Arc<dyn IdentityApi>, navigator: Arc<dyn Navigator>) -> Self {
        Self { api, navigator, inner: Mutex::new(Inner { state: SessionState::resolving(), issued: 0, mounted: false }) }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Run the one identity resolution that belongs to this page load.
    /// Later calls do nothing.
    pub async fn mount(&self) {
        {
            let mut inner = self.lock();
            if inner.mounted {
                return;
            }
            inner.mounted = true;
        }
        self.fetch_user().await;
    }

    /// Resolve the session again. Failures are not retried.
    pub async fn fetch_user(&self) {
        let seq = {
            let mut inner = self.lock();
            inner.issued += 1;
            inner.issued
        };

        let result = self.api.me().await;

        let mut inner = self.lock();
        if seq != inner.issued {
            tracing::debug!(seq, latest = inner.issued, "dropping stale identity response");
            return;
        }

        let next = match result {
            Ok(user) => {
                tracing::debug!(user_id = %user.id, "session resolved");
                SessionState { user: Some(user), loading: false, failure: None }
            }
            Err(e) => {
                tracing::warn!(error = %e, "identity resolution failed");
                SessionState { user: None, loading: false, failure: Some(e.failure()) }
            }
        };
        let previous = std::mem::replace(&mut inner.state, next);
        let redirect = became_unauthenticated(&previous, &inner.state);
        drop(inner);

        if redirect {
            self.redirect_unless_public();
        }
    }

    /// End the session. On failure the current state is kept as is.
    pub async fn logout(&self) {
        match self.api.logout().await {
            Ok(()) => {
                {
                    let mut inner = self.lock();
                    inner.issued += 1;
                    inner.state = SessionState { user: None, loading: false, failure: None };
                }
                tracing::info!("logged out");
                self.navigator.push(LOGIN_PATH);
            }
            Err(e) => {
                tracing::error!(error = %e, "logout failed");
            }
        }
    }

    fn redirect_unless_public(&self) {
        let path = self.navigator.current_path();
        if PUBLIC_ROUTES.contains(&path.as_str()) {
            return;
        }
        tracing::info!(%path, "no session, redirecting to login");
        self.navigator.push(LOGIN_PATH);
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.lock().state.clone()
    }

    #[must_use]
    pub fn user(&self) -> Option<Identity> {
        self.lock().state.user.clone()
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.lock().state.loading
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.lock().state.status()
    }

    #[must_use]
    pub fn access(&self) -> Access {
        self.lock().state.access()
    }
}

/// True when a mutation moved the state into "settled with no user".
fn became_unauthenticated(previous: &SessionState, current: &SessionState) -> bool {
    let settled_anonymous = !current.loading && current.user.is_none();
    let changed = previous.loading || previous.user.is_some();
    settled_anonymous && changed
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
