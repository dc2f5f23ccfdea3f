//! Session credential storage backed by client-readable cookies.
//!
//! ARCHITECTURE
//! ============
//! The session is two independent cookies: `token` (raw bearer string) and
//! `user` (JSON profile). The cookie jar percent-encodes values exactly once
//! on the way out and decodes them once on the way in, so the wire form of
//! `user` is URL-encoded JSON that client code can `decodeURIComponent`.
//!
//! Both are written with a 24-hour window and cleared together, but nothing
//! cross-validates them: a profile may be read while the token is missing.
//! Callers treat the pair as one session.
//!
//! A store without a jar has no browser context. Reads are absent and writes
//! are dropped.

use axum::extract::FromRef;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::state::AppState;

pub const TOKEN_COOKIE: &str = "token";
pub const USER_COOKIE: &str = "user";

/// Lifetime of both session cookies, fixed at write time.
pub const SESSION_TTL: Duration = Duration::hours(24);

// =============================================================================
// USER PROFILE
// =============================================================================

/// Section-level permission attached to a user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub section: String,
    pub access: String,
}

/// Profile of the signed-in user as issued by the remote auth service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    /// Given name.
    pub name: String,
    /// Family name.
    pub last_name: String,
    pub email: String,
    pub username: String,
    /// National ID document number.
    pub dni: String,
    /// Role label (e.g. `"admin"`).
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<Permission>>,
}

impl SessionUser {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.last_name).trim().to_owned()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("failed to serialize user profile: {0}")]
    Serialize(#[from] serde_json::Error),
}

// =============================================================================
// CREDENTIAL STORE
// =============================================================================

/// Single read/write path for the session cookies.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    jar: Option<CookieJar>,
    secure: bool,
}

impl CredentialStore {
    /// Store over the cookies of one request/response cycle.
    #[must_use]
    pub fn from_jar(jar: CookieJar, secure: bool) -> Self {
        Self { jar: Some(jar), secure }
    }

    /// Store with no browser context.
    #[must_use]
    pub fn detached() -> Self {
        Self { jar: None, secure: false }
    }

    /// Persist the bearer token for 24 hours. The token shape is not checked.
    pub fn set_token(&mut self, token: &str) {
        let cookie = self.session_cookie(TOKEN_COOKIE, token.to_owned());
        self.put(cookie);
    }

    /// Persist the user profile as JSON for 24 hours.
    pub fn set_user(&mut self, user: &SessionUser) -> Result<(), CredentialError> {
        let json = serde_json::to_string(user)?;
        let cookie = self.session_cookie(USER_COOKIE, json);
        self.put(cookie);
        Ok(())
    }

    /// Write token then user. A failure between the two writes leaves the
    /// token stored on its own.
    pub fn store_session(&mut self, token: &str, user: &SessionUser) -> Result<(), CredentialError> {
        self.set_token(token);
        self.set_user(user)
    }

    /// Stored bearer token, or `None` when unset, expired, or detached.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.live_value(TOKEN_COOKIE)
    }

    /// Stored user profile, or `None` when unset, expired, malformed, or detached.
    #[must_use]
    pub fn user(&self) -> Option<SessionUser> {
        let raw = self.live_value(USER_COOKIE)?;
        decode_user(&raw)
    }

    /// Expire both entries immediately. Safe to call when nothing is stored.
    pub fn remove_token(&mut self) {
        for name in [TOKEN_COOKIE, USER_COOKIE] {
            let cookie = Cookie::build((name, ""))
                .path("/")
                .http_only(false)
                .same_site(SameSite::Lax)
                .secure(self.secure)
                .max_age(Duration::ZERO)
                .expires(OffsetDateTime::UNIX_EPOCH)
                .build();
            self.put(cookie);
        }
    }

    /// Hand the jar back so its `Set-Cookie` delta reaches the response.
    #[must_use]
    pub fn into_jar(self) -> CookieJar {
        self.jar.unwrap_or_default()
    }

    fn session_cookie(&self, name: &'static str, value: String) -> Cookie<'static> {
        Cookie::build((name, value))
            .path("/")
            .http_only(false)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .max_age(SESSION_TTL)
            .expires(OffsetDateTime::now_utc() + SESSION_TTL)
            .build()
    }

    fn put(&mut self, cookie: Cookie<'static>) {
        match self.jar.take() {
            Some(jar) => self.jar = Some(jar.add(cookie)),
            None => tracing::debug!(name = cookie.name(), "no cookie context; dropping credential write"),
        }
    }

    fn live_value(&self, name: &str) -> Option<String> {
        let cookie = self.jar.as_ref()?.get(name)?;
        if let Some(expires) = cookie.expires_datetime() {
            if expires <= OffsetDateTime::now_utc() {
                return None;
            }
        }
        let value = cookie.value();
        if value.is_empty() { None } else { Some(value.to_owned()) }
    }
}

fn decode_user(raw: &str) -> Option<SessionUser> {
    match serde_json::from_str(raw) {
        Ok(user) => Some(user),
        Err(e) => {
            tracing::debug!(error = %e, "stored user profile is malformed");
            None
        }
    }
}

// =============================================================================
// EXTRACTOR
// =============================================================================

impl<S> axum::extract::FromRequestParts<S> for CredentialStore
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);
        Ok(Self::from_jar(jar, app_state.config.cookie_secure))
    }
}

#[cfg(test)]
#[path = "credentials_test.rs"]
mod tests;
