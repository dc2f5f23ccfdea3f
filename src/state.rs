//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It is
//! read-only after startup: configuration, the route policy, and HTTP clients
//! for the remote API. Session data never lives here; it travels in each
//! request's cookies.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::guard::RoutePolicy;
use crate::services::api::ApiClient;
use crate::services::auth::AuthClient;

/// Clone is required by Axum; inner fields are Arc-wrapped or cheap handles.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub policy: Arc<RoutePolicy>,
    pub auth: AuthClient,
    pub api: ApiClient,
}

impl AppState {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        let http = reqwest::Client::new();
        let policy = RoutePolicy::default().with_token_expiry_check(config.verify_token_expiry);
        Self {
            auth: AuthClient::new(http.clone(), config.api_base_url.clone()),
            api: ApiClient::new(http, config.api_base_url.clone()),
            policy: Arc::new(policy),
            config: Arc::new(config),
        }
    }
}
