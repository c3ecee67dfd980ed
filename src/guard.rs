//! Edge route guard — coarse, synchronous cookie-presence check.
//!
//! DESIGN
//! ======
//! The guard runs before any page handler and decides only between
//! "forward" and "redirect to login". It checks that a session cookie is
//! present and non-empty; it never validates the token. Validation belongs to
//! the identity endpoint, reached through `session::SessionContext`, which is
//! the authoritative layer.
//!
//! TRADE-OFFS
//! ==========
//! Redirects drop the originally requested path (no return URL). Users land
//! on the login page and navigate back by hand.

/// Cookie carrying the opaque session token issued by the remote auth API.
pub const SESSION_COOKIE: &str = "token";

/// Where unauthenticated requests are sent.
pub const LOGIN_PATH: &str = "/login";

/// Path prefixes (without the leading `/`) the guard never intercepts.
const MATCHER_EXCLUSIONS: [&str; 3] = ["_next/static", "_next/image", "favicon.ico"];

/// Path prefixes reachable without a session cookie.
const PUBLIC_PREFIXES: [&str; 3] = ["/login", "/auth/login", "/auth/me"];

/// Outcome of evaluating one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Pass,
    Redirect(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardPolicy {
    pub cookie_name: String,
    pub login_path: String,
    pub public_prefixes: Vec<String>,
    pub matcher_exclusions: Vec<String>,
}

impl Default for GuardPolicy {
    fn default() -> Self {
        Self {
            cookie_name: SESSION_COOKIE.to_owned(),
            login_path: LOGIN_PATH.to_owned(),
            public_prefixes: PUBLIC_PREFIXES.iter().map(|p| (*p).to_owned()).collect(),
            matcher_exclusions: MATCHER_EXCLUSIONS.iter().map(|p| (*p).to_owned()).collect(),
        }
    }
}

impl GuardPolicy {
    /// Whether the guard applies to `path` at all. Build assets and the
    /// favicon are excluded.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        let trimmed = path.strip_prefix('/').unwrap_or(path);
        !self
            .matcher_exclusions
            .iter()
            .any(|prefix| trimmed.starts_with(prefix.as_str()))
    }

    #[must_use]
    pub fn is_public(&self, path: &str) -> bool {
        self.public_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }

    /// Decide what to do with a request for `path` carrying `token`.
    ///
    /// Public paths pass without looking at the cookie. Any non-empty token
    /// passes, valid or not.
    #[must_use]
    pub fn evaluate(&self, path: &str, token: Option<&str>) -> GuardDecision {
        if !self.matches(path) || self.is_public(path) {
            return GuardDecision::Pass;
        }

        match token {
            Some(value) if !value.is_empty() => GuardDecision::Pass,
            _ => GuardDecision::Redirect(self.login_path.clone()),
        }
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
