//! Login exchange against the remote authentication service.
//!
//! Obtaining a session and persisting it are separate steps: this client only
//! returns what the server issued, and the caller decides what to store.

use serde::{Deserialize, Serialize};

use super::credentials::SessionUser;
use super::response::server_message;

/// User-visible wording when the server gives no usable message.
pub const LOGIN_FALLBACK_MESSAGE: &str = "Error signing in";

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Successful login body, returned verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: SessionUser,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("login rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("auth request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected login response: {0}")]
    Malformed(String),
}

impl AuthError {
    /// Message to show inline on the login form.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Rejected { message, .. } => message,
            Self::Transport(_) | Self::Malformed(_) => LOGIN_FALLBACK_MESSAGE,
        }
    }
}

/// Client for `POST {base}/auth/login`.
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self { http, base_url: base_url.into() }
    }

    #[must_use]
    pub fn login_url(&self) -> String {
        format!("{}/auth/login", self.base_url)
    }

    /// Exchange a username/password pair for a token and profile.
    ///
    /// Single request; no retry.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, AuthError> {
        let resp = self
            .http
            .post(self.login_url())
            .json(&LoginRequest { username, password })
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            let message = server_message(&body).unwrap_or_else(|| LOGIN_FALLBACK_MESSAGE.to_owned());
            tracing::info!(status = status.as_u16(), %message, "login rejected");
            return Err(AuthError::Rejected { status: status.as_u16(), message });
        }

        serde_json::from_str(&body).map_err(|e| AuthError::Malformed(e.to_string()))
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
