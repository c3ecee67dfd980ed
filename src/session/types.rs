//! Session types — identity record, state snapshot, and errors.

use serde::{Deserialize, Serialize};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced while talking to the remote auth API.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The auth API answered with a non-success status.
    #[error("auth API rejected request: status {status}")]
    Rejected { status: u16 },

    /// The request never produced a response (connect, timeout, reset).
    #[error("auth API request failed: {0}")]
    Transport(String),

    /// The identity body could not be deserialized.
    #[error("identity response parse failed: {0}")]
    Decode(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl SessionError {
    /// Classify the error for the session state.
    #[must_use]
    pub fn failure(&self) -> SessionFailure {
        match self {
            Self::Rejected { status: 401 | 403 } => SessionFailure::NoSession,
            Self::Rejected { .. } | Self::Transport(_) | Self::Decode(_) | Self::HttpClientBuild(_) => {
                SessionFailure::Unavailable
            }
        }
    }
}

/// Why the last identity resolution did not produce a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionFailure {
    /// The auth API said there is no valid session.
    NoSession,
    /// The auth API could not be reached or answered unexpectedly.
    Unavailable,
}

// =============================================================================
// IDENTITY
// =============================================================================

/// User id as sent by the auth API: numeric or opaque string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdentityId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for IdentityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Current user as returned by `GET /auth/me`.
///
/// Only `id` is required. The other typed fields are optional because a 200
/// from the auth API is a session whatever else the body carries; the rest
/// of the body is kept in `extra` so nothing the API sent is lost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: IdentityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<IdentityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// =============================================================================
// STATE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Resolving,
    Authenticated,
    Unauthenticated,
}

/// Snapshot of a session context.
///
/// `loading` is true only until the first identity resolution of a mount has
/// been applied. `user` is indeterminate while `loading` is true.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub user: Option<Identity>,
    pub loading: bool,
    pub failure: Option<SessionFailure>,
}

impl SessionState {
    #[must_use]
    pub fn resolving() -> Self {
        Self { user: None, loading: true, failure: None }
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        match (&self.user, self.loading) {
            (_, true) => SessionStatus::Resolving,
            (Some(_), false) => SessionStatus::Authenticated,
            (None, false) => SessionStatus::Unauthenticated,
        }
    }

    /// Gate for privileged work. Never treats a pending resolution as
    /// logged out.
    #[must_use]
    pub fn access(&self) -> Access {
        match self.status() {
            SessionStatus::Resolving => Access::Pending,
            SessionStatus::Authenticated => self.user.clone().map_or(Access::Denied, Access::Granted),
            SessionStatus::Unauthenticated => Access::Denied,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::resolving()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Access {
    Pending,
    Granted(Identity),
    Denied,
}

// =============================================================================
// NAVBAR
// =============================================================================

/// Sections linked from the navbar once signed in: `(label, path)`.
pub const NAV_LINKS: [(&str, &str); 4] = [
    ("Activity", "/activity"),
    ("Team", "/team"),
    ("Inventory", "/inventory"),
    ("Calendar", "/calendar"),
];

/// What the console navbar shows for a session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavbarView {
    Loading,
    SignedIn { name: Option<String>, customer_name: Option<String> },
    SignedOut,
}

impl NavbarView {
    /// Navigation links to render. Empty unless signed in.
    #[must_use]
    pub fn links(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::SignedIn { .. } => &NAV_LINKS,
            Self::Loading | Self::SignedOut => &[],
        }
    }
}

impl From<&SessionState> for NavbarView {
    fn from(state: &SessionState) -> Self {
        match state.access() {
            Access::Pending => Self::Loading,
            Access::Granted(user) => Self::SignedIn { name: user.name, customer_name: user.customer_name },
            Access::Denied => Self::SignedOut,
        }
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
