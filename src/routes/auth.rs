//! Auth routes — login form, credential exchange, logout.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;

use super::pages;
use crate::services::auth::AuthError;
use crate::services::credentials::CredentialStore;
use crate::state::AppState;

const MISSING_INPUT_MESSAGE: &str = "Enter username and password.";

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

/// Both fields are required; the username is trimmed, the password is not.
pub(crate) fn validate_login_input(username: &str, password: &str) -> Result<(String, String), &'static str> {
    let username = username.trim();
    if username.is_empty() || password.trim().is_empty() {
        return Err(MISSING_INPUT_MESSAGE);
    }
    Ok((username.to_owned(), password.to_owned()))
}

pub(crate) fn auth_error_to_status(err: &AuthError) -> StatusCode {
    match err {
        AuthError::Rejected { .. } => StatusCode::UNAUTHORIZED,
        AuthError::Transport(_) | AuthError::Malformed(_) => StatusCode::BAD_GATEWAY,
    }
}

/// `GET /login`
pub async fn login_page() -> Response {
    pages::respond(StatusCode::OK, pages::login_page("", None))
}

/// `POST /login` — exchange credentials, store the session, go to the landing page.
pub async fn login(State(state): State<AppState>, mut store: CredentialStore, Form(form): Form<LoginForm>) -> Response {
    let (username, password) = match validate_login_input(&form.username, &form.password) {
        Ok(input) => input,
        Err(message) => {
            return pages::respond(
                StatusCode::UNPROCESSABLE_ENTITY,
                pages::login_page(form.username.trim(), Some(message)),
            );
        }
    };

    let session = match state.auth.login(&username, &password).await {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!(error = %e, %username, "login failed");
            let status = auth_error_to_status(&e);
            return pages::respond(status, pages::login_page(&username, Some(e.user_message())));
        }
    };

    if let Err(e) = store.store_session(&session.access_token, &session.user) {
        tracing::error!(error = %e, %username, "failed to store user profile");
    }
    tracing::info!(%username, user_id = session.user.id, "signed in");

    let landing = state.policy.landing_path().to_owned();
    (store.into_jar(), Redirect::to(&landing)).into_response()
}

/// `POST /logout` — expire both session cookies.
pub async fn logout(State(state): State<AppState>, mut store: CredentialStore) -> Response {
    store.remove_token();
    let login = state.policy.login_path().to_owned();
    (store.into_jar(), Redirect::to(&login)).into_response()
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
