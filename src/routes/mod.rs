//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! All routes share one Axum router. The route guard wraps every route so
//! protection is decided before any handler runs; handlers themselves never
//! redirect to login.

pub mod auth;
pub mod dashboard;
pub mod pages;

use axum::Router;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::Redirect;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::guard;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(redirect_root_to_landing))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/home", get(dashboard::home))
        .route("/home/references/incomes", get(dashboard::income_references))
        .route("/home/references/expenses", get(dashboard::expense_references))
        .route("/home/incomes", get(dashboard::list_incomes).post(dashboard::create_income))
        .route("/home/expenses", get(dashboard::list_expenses).post(dashboard::create_expense))
        .route("/home/transfers", get(dashboard::list_transfers).post(dashboard::create_transfer))
        .route("/profile", get(dashboard::profile))
        .route("/testing", get(dashboard::testing))
        .route("/healthz", get(healthz))
        .layer(middleware::from_fn_with_state(state.clone(), guard::route_guard))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn redirect_root_to_landing() -> Redirect {
    Redirect::temporary(guard::LANDING_PATH)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
