//! Remote auth API client.
//!
//! Thin HTTP wrapper for `/auth/me` and `/auth/logout` on the BookNGo API.
//! The session cookie is forwarded on every call; status handling lives in
//! `parse_identity` so it can be tested without a socket.

use std::time::Duration;

use reqwest::header::COOKIE;

use super::IdentityApi;
use super::types::{Identity, SessionError};
use crate::config::ApiTimeouts;
use crate::guard::SESSION_COOKIE;

/// Build the process-wide HTTP client for the remote API.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized.
pub fn build_client(timeouts: ApiTimeouts) -> Result<reqwest::Client, SessionError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeouts.request_secs))
        .connect_timeout(Duration::from_secs(timeouts.connect_secs))
        .build()
        .map_err(|e| SessionError::HttpClientBuild(e.to_string()))
}

// =============================================================================
// CLIENT
// =============================================================================

/// Identity API bound to one caller's session cookie.
#[derive(Clone)]
pub struct HttpIdentityApi {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpIdentityApi {
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self { http, base_url: base_url.into(), token: None }
    }

    /// Attach the caller's session token. Empty tokens are ignored.
    #[must_use]
    pub fn with_session_token(mut self, token: Option<&str>) -> Self {
        self.token = token.filter(|t| !t.is_empty()).map(str::to_owned);
        self
    }

    fn with_credentials(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.header(COOKIE, format!("{SESSION_COOKIE}={token}")),
            None => request,
        }
    }
}

#[async_trait::async_trait]
impl IdentityApi for HttpIdentityApi {
    async fn me(&self) -> Result<Identity, SessionError> {
        let url = format!("{}/auth/me", self.base_url);
        let response = self
            .with_credentials(self.http.get(&url))
            .send()
            .await
            .map_err(|e| SessionError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| SessionError::Transport(e.to_string()))?;

        parse_identity(status, &text)
    }

    async fn logout(&self) -> Result<(), SessionError> {
        let url = format!("{}/auth/logout", self.base_url);
        let response = self
            .with_credentials(self.http.post(&url))
            .send()
            .await
            .map_err(|e| SessionError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SessionError::Rejected { status: response.status().as_u16() });
        }
        Ok(())
    }
}

// =============================================================================
// PARSING
// =============================================================================

/// Turn an `/auth/me` response into an identity.
///
/// # Errors
///
/// `Rejected` for any non-2xx status, `Decode` for an unreadable body.
pub(crate) fn parse_identity(status: u16, body: &str) -> Result<Identity, SessionError> {
    if !(200..300).contains(&status) {
        return Err(SessionError::Rejected { status });
    }
    serde_json::from_str(body).map_err(|e| SessionError::Decode(e.to_string()))
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
