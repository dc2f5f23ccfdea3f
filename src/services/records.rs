//! Wire types for the downstream dashboard endpoints.
//!
//! These mirror the remote API's JSON. Amounts are decimal numbers as sent by
//! the server; this layer forwards them without arithmetic.

use serde::{Deserialize, Serialize};

/// Active/inactive lookup record (cash register, income or expense category).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupRecord {
    pub id: i64,
    pub name: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Audit fields the server attaches to every stored movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Audit {
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewIncome {
    pub register_id: i64,
    pub category_id: i64,
    pub amount: f64,
    pub date: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    pub register_id: i64,
    pub category_id: i64,
    pub amount: f64,
    pub date: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Movement of funds between two registers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransfer {
    pub from_register_id: i64,
    pub to_register_id: i64,
    pub amount: f64,
    pub date: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewTransfer {
    /// Superficial check before submitting.
    ///
    /// # Errors
    ///
    /// Returns a user-facing message when the transfer is obviously invalid.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.from_register_id == self.to_register_id {
            return Err("Source and destination registers must differ.");
        }
        validate_amount(self.amount)
    }
}

/// Amounts must be finite and strictly positive.
///
/// # Errors
///
/// Returns a user-facing message for zero, negative or non-finite amounts.
pub fn validate_amount(amount: f64) -> Result<(), &'static str> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err("Amount must be greater than zero.")
    }
}

/// Stored income, expense or transfer as read back from the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementRecord {
    pub id: i64,
    pub amount: f64,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub audit: Audit,
    /// Remaining movement-specific fields (register, category, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Headline figure on the landing page, computed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DashboardSummary {
    #[serde(default)]
    pub metrics: Vec<Metric>,
    #[serde(default)]
    pub series: Vec<SeriesPoint>,
}

/// Lookup collections needed to populate a movement form.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct ReferenceData {
    pub registers: Vec<LookupRecord>,
    pub categories: Vec<LookupRecord>,
}
