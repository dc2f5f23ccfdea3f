//! Authenticated dashboard routes.
//!
//! SYSTEM CONTEXT
//! ==============
//! These handlers sit behind the route guard, but each still reads the token
//! itself: the guard only checks presence, and the remote API decides whether
//! the token is still good. Downstream failures are handled per handler.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use super::pages;
use crate::services::api::ApiError;
use crate::services::credentials::CredentialStore;
use crate::services::records::{
    DashboardSummary, MovementRecord, NewExpense, NewIncome, NewTransfer, ReferenceData, validate_amount,
};
use crate::state::AppState;

const NO_SESSION_MESSAGE: &str = "Session expired. Sign in again.";

fn message_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

pub(crate) fn api_error_to_status(err: &ApiError) -> StatusCode {
    err.status()
        .and_then(|s| StatusCode::from_u16(s).ok())
        .unwrap_or(StatusCode::BAD_GATEWAY)
}

fn require_token(store: &CredentialStore) -> Result<String, Response> {
    store
        .token()
        .ok_or_else(|| message_response(StatusCode::UNAUTHORIZED, NO_SESSION_MESSAGE))
}

fn saved(result: Result<MovementRecord, ApiError>, what: &'static str) -> Response {
    match result {
        Ok(record) => {
            tracing::info!(id = record.id, kind = what, "record created");
            (StatusCode::CREATED, Json(record)).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, kind = what, "record submission failed");
            message_response(api_error_to_status(&e), e.user_message())
        }
    }
}

fn listed(result: Result<Vec<MovementRecord>, ApiError>, what: &'static str) -> Response {
    match result {
        Ok(records) => Json(records).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, kind = what, "record list fetch failed");
            message_response(api_error_to_status(&e), e.user_message())
        }
    }
}

// =============================================================================
// PAGES
// =============================================================================

/// `GET /home` — landing page. A failed summary fetch renders an empty page.
pub async fn home(State(state): State<AppState>, store: CredentialStore) -> Response {
    let summary = match store.token() {
        Some(token) => state.api.dashboard_summary(&token).await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "dashboard summary fetch failed");
            DashboardSummary::default()
        }),
        None => DashboardSummary::default(),
    };
    pages::respond(StatusCode::OK, pages::home_page(store.user().as_ref(), &summary))
}

/// `GET /profile`
pub async fn profile(store: CredentialStore) -> Response {
    pages::respond(StatusCode::OK, pages::profile_page(store.user().as_ref()))
}

/// `GET /testing` — session diagnostics.
pub async fn testing(store: CredentialStore) -> Json<serde_json::Value> {
    Json(json!({
        "token_present": store.token().is_some(),
        "user": store.user(),
    }))
}

// =============================================================================
// REFERENCE DATA
// =============================================================================

/// `GET /home/references/incomes`
pub async fn income_references(State(state): State<AppState>, store: CredentialStore) -> Response {
    match require_token(&store) {
        Ok(token) => Json::<ReferenceData>(state.api.load_income_references(&token).await).into_response(),
        Err(resp) => resp,
    }
}

/// `GET /home/references/expenses`
pub async fn expense_references(State(state): State<AppState>, store: CredentialStore) -> Response {
    match require_token(&store) {
        Ok(token) => Json::<ReferenceData>(state.api.load_expense_references(&token).await).into_response(),
        Err(resp) => resp,
    }
}

// =============================================================================
// MOVEMENTS
// =============================================================================

/// `GET /home/incomes`
pub async fn list_incomes(State(state): State<AppState>, store: CredentialStore) -> Response {
    match require_token(&store) {
        Ok(token) => listed(state.api.incomes(&token).await, "income"),
        Err(resp) => resp,
    }
}

/// `GET /home/expenses`
pub async fn list_expenses(State(state): State<AppState>, store: CredentialStore) -> Response {
    match require_token(&store) {
        Ok(token) => listed(state.api.expenses(&token).await, "expense"),
        Err(resp) => resp,
    }
}

/// `GET /home/transfers`
pub async fn list_transfers(State(state): State<AppState>, store: CredentialStore) -> Response {
    match require_token(&store) {
        Ok(token) => listed(state.api.transfers(&token).await, "transfer"),
        Err(resp) => resp,
    }
}

/// `POST /home/incomes`
pub async fn create_income(
    State(state): State<AppState>,
    store: CredentialStore,
    Json(income): Json<NewIncome>,
) -> Response {
    let token = match require_token(&store) {
        Ok(token) => token,
        Err(resp) => return resp,
    };
    if let Err(message) = validate_amount(income.amount) {
        return message_response(StatusCode::UNPROCESSABLE_ENTITY, message);
    }
    saved(state.api.create_income(&token, &income).await, "income")
}

/// `POST /home/expenses`
pub async fn create_expense(
    State(state): State<AppState>,
    store: CredentialStore,
    Json(expense): Json<NewExpense>,
) -> Response {
    let token = match require_token(&store) {
        Ok(token) => token,
        Err(resp) => return resp,
    };
    if let Err(message) = validate_amount(expense.amount) {
        return message_response(StatusCode::UNPROCESSABLE_ENTITY, message);
    }
    saved(state.api.create_expense(&token, &expense).await, "expense")
}

/// `POST /home/transfers`
pub async fn create_transfer(
    State(state): State<AppState>,
    store: CredentialStore,
    Json(transfer): Json<NewTransfer>,
) -> Response {
    let token = match require_token(&store) {
        Ok(token) => token,
        Err(resp) => return resp,
    };
    if let Err(message) = transfer.validate() {
        return message_response(StatusCode::UNPROCESSABLE_ENTITY, message);
    }
    saved(state.api.create_transfer(&token, &transfer).await, "transfer")
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
