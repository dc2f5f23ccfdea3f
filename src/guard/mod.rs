//! Route protection evaluated before any page handler runs.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every navigation is classified against a fixed prefix list built once at
//! startup. The guard reads the token through [`CredentialStore`] like every
//! handler does and looks only at its presence; a present-but-revoked token
//! passes here and is rejected later by the remote API on the first data call.
//!
//! Rules, in order:
//! 1. protected prefix without a token -> login path
//! 2. login path with a token -> landing path
//! 3. anything else passes unmodified
//!
//! With expiry verification enabled, a JWT whose `exp` has passed counts as
//! no token. Opaque tokens are unaffected.

pub mod token;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use time::OffsetDateTime;

use crate::services::credentials::CredentialStore;
use crate::state::AppState;

pub const LOGIN_PATH: &str = "/login";
pub const LANDING_PATH: &str = "/home";
pub const PROTECTED_PREFIXES: [&str; 3] = ["/home", "/profile", "/testing"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Pass,
    Redirect(String),
}

#[derive(Debug, Clone)]
pub struct RoutePolicy {
    protected: Vec<String>,
    login_path: String,
    landing_path: String,
    verify_token_expiry: bool,
}

impl Default for RoutePolicy {
    fn default() -> Self {
        Self::new(PROTECTED_PREFIXES, LOGIN_PATH, LANDING_PATH)
    }
}

impl RoutePolicy {
    #[must_use]
    pub fn new<I, P>(protected: I, login_path: &str, landing_path: &str) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            protected: protected
                .into_iter()
                .map(|p| {
                    let p: String = p.into();
                    p.trim_end_matches('/').to_owned()
                })
                .collect(),
            login_path: login_path.to_owned(),
            landing_path: landing_path.to_owned(),
            verify_token_expiry: false,
        }
    }

    #[must_use]
    pub fn with_token_expiry_check(mut self, enabled: bool) -> Self {
        self.verify_token_expiry = enabled;
        self
    }

    #[must_use]
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    #[must_use]
    pub fn landing_path(&self) -> &str {
        &self.landing_path
    }

    /// Segment-aware prefix match: `/home` covers `/home` and `/home/...`
    /// but not `/homepage`.
    #[must_use]
    pub fn is_protected(&self, path: &str) -> bool {
        self.protected.iter().any(|prefix| matches_prefix(path, prefix))
    }

    #[must_use]
    pub fn is_login(&self, path: &str) -> bool {
        path.trim_end_matches('/') == self.login_path
    }

    /// Whether a cookie value counts as an established session.
    #[must_use]
    pub fn has_session(&self, cookie: Option<&str>, now: OffsetDateTime) -> bool {
        match cookie {
            Some(t) if !t.is_empty() => !(self.verify_token_expiry && token::is_expired(t, now)),
            _ => false,
        }
    }

    #[must_use]
    pub fn decide(&self, path: &str, token: Option<&str>) -> GuardDecision {
        self.decide_at(path, token, OffsetDateTime::now_utc())
    }

    #[must_use]
    pub fn decide_at(&self, path: &str, token: Option<&str>, now: OffsetDateTime) -> GuardDecision {
        let has_session = self.has_session(token, now);
        if self.is_protected(path) && !has_session {
            return GuardDecision::Redirect(self.login_path.clone());
        }
        if self.is_login(path) && has_session {
            return GuardDecision::Redirect(self.landing_path.clone());
        }
        GuardDecision::Pass
    }
}

fn matches_prefix(path: &str, prefix: &str) -> bool {
    if prefix.is_empty() {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Axum middleware applying [`RoutePolicy::decide`] to every request.
pub async fn route_guard(State(state): State<AppState>, store: CredentialStore, req: Request, next: Next) -> Response {
    let path = req.uri().path().to_owned();
    let token = store.token();

    match state.policy.decide(&path, token.as_deref()) {
        GuardDecision::Pass => next.run(req).await,
        GuardDecision::Redirect(to) => {
            tracing::debug!(%path, %to, "route guard redirect");
            Redirect::temporary(&to).into_response()
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
