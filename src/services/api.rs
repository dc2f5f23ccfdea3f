//! Bearer-authenticated client for the dashboard's downstream endpoints.
//!
//! ERROR HANDLING
//! ==============
//! Reference-data loads degrade: a failed collection is logged and replaced by
//! an empty one so the page still renders. Mutations surface the server's
//! message (or a fallback) so the caller can keep the user on the form.
//! Downstream 401/403 are returned like any other rejection; there is no
//! central redirect-to-login here.

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::records::{
    DashboardSummary, LookupRecord, MovementRecord, NewExpense, NewIncome, NewTransfer, ReferenceData,
};
use super::response::server_message;

/// User-visible wording when a mutation fails without a server message.
pub const SAVE_FALLBACK_MESSAGE: &str = "Error saving record";

pub const REGISTERS_PATH: &str = "/cash-registers";
pub const INCOME_CATEGORIES_PATH: &str = "/income-categories";
pub const EXPENSE_CATEGORIES_PATH: &str = "/expense-categories";
pub const INCOMES_PATH: &str = "/incomes";
pub const EXPENSES_PATH: &str = "/expenses";
pub const TRANSFERS_PATH: &str = "/transfers";
pub const DASHBOARD_SUMMARY_PATH: &str = "/dashboard/summary";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("api rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("api request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected api response: {0}")]
    Malformed(String),
}

impl ApiError {
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Rejected { message, .. } => message,
            Self::Transport(_) | Self::Malformed(_) => SAVE_FALLBACK_MESSAGE,
        }
    }

    /// Upstream status for rejections; `None` for transport or decode failures.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            Self::Transport(_) | Self::Malformed(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self { http, base_url: base_url.into() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn request<B, T>(&self, method: Method, token: &str, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut req = self.http.request(method, self.url(path)).bearer_auth(token);
        if let Some(body) = body {
            req = req.json(body);
        }
        let resp = req.send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            let message = server_message(&text).unwrap_or_else(|| SAVE_FALLBACK_MESSAGE.to_owned());
            return Err(ApiError::Rejected { status: status.as_u16(), message });
        }

        serde_json::from_str(&text).map_err(|e| ApiError::Malformed(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, token: &str, path: &str) -> Result<T, ApiError> {
        self.request::<(), T>(Method::GET, token, path, None).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, token: &str, path: &str, body: &B) -> Result<T, ApiError> {
        self.request(Method::POST, token, path, Some(body)).await
    }

    // =========================================================================
    // REFERENCE DATA
    // =========================================================================

    pub async fn registers(&self, token: &str, active: bool) -> Result<Vec<LookupRecord>, ApiError> {
        self.get(token, &format!("{REGISTERS_PATH}?active={active}")).await
    }

    pub async fn income_categories(&self, token: &str, active: bool) -> Result<Vec<LookupRecord>, ApiError> {
        self.get(token, &format!("{INCOME_CATEGORIES_PATH}?active={active}")).await
    }

    pub async fn expense_categories(&self, token: &str, active: bool) -> Result<Vec<LookupRecord>, ApiError> {
        self.get(token, &format!("{EXPENSE_CATEGORIES_PATH}?active={active}")).await
    }

    /// Active registers and income categories, fetched concurrently.
    pub async fn load_income_references(&self, token: &str) -> ReferenceData {
        let (registers, categories) =
            tokio::join!(self.registers(token, true), self.income_categories(token, true));
        ReferenceData {
            registers: or_empty(registers, "registers"),
            categories: or_empty(categories, "income categories"),
        }
    }

    /// Active registers and expense categories, fetched concurrently.
    pub async fn load_expense_references(&self, token: &str) -> ReferenceData {
        let (registers, categories) =
            tokio::join!(self.registers(token, true), self.expense_categories(token, true));
        ReferenceData {
            registers: or_empty(registers, "registers"),
            categories: or_empty(categories, "expense categories"),
        }
    }

    // =========================================================================
    // MOVEMENTS
    // =========================================================================

    pub async fn incomes(&self, token: &str) -> Result<Vec<MovementRecord>, ApiError> {
        self.get(token, INCOMES_PATH).await
    }

    pub async fn expenses(&self, token: &str) -> Result<Vec<MovementRecord>, ApiError> {
        self.get(token, EXPENSES_PATH).await
    }

    pub async fn transfers(&self, token: &str) -> Result<Vec<MovementRecord>, ApiError> {
        self.get(token, TRANSFERS_PATH).await
    }

    pub async fn create_income(&self, token: &str, income: &NewIncome) -> Result<MovementRecord, ApiError> {
        self.post(token, INCOMES_PATH, income).await
    }

    pub async fn create_expense(&self, token: &str, expense: &NewExpense) -> Result<MovementRecord, ApiError> {
        self.post(token, EXPENSES_PATH, expense).await
    }

    pub async fn create_transfer(&self, token: &str, transfer: &NewTransfer) -> Result<MovementRecord, ApiError> {
        self.post(token, TRANSFERS_PATH, transfer).await
    }

    pub async fn dashboard_summary(&self, token: &str) -> Result<DashboardSummary, ApiError> {
        self.get(token, DASHBOARD_SUMMARY_PATH).await
    }
}

fn or_empty<T>(result: Result<Vec<T>, ApiError>, what: &'static str) -> Vec<T> {
    result.unwrap_or_else(|e| {
        tracing::warn!(error = %e, collection = what, "reference data fetch failed; using empty list");
        Vec::new()
    })
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
