use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use crate::services::records::validate_amount;

const TOKEN: &str = "tok-123";

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(reqwest::Client::new(), server.uri())
}

fn lookup_list(names: &[&str]) -> serde_json::Value {
    let items: Vec<serde_json::Value> = names
        .iter()
        .enumerate()
        .map(|(i, name)| json!({ "id": i + 1, "name": name, "active": true }))
        .collect();
    json!(items)
}

fn sample_income() -> NewIncome {
    NewIncome {
        register_id: 1,
        category_id: 4,
        amount: 1500.5,
        date: "2026-10-01".to_owned(),
        description: Some("Daily sales".to_owned()),
    }
}

#[tokio::test]
async fn registers_sends_bearer_and_active_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(REGISTERS_PATH))
        .and(query_param("active", "true"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(lookup_list(&["Main", "Kiosk"])))
        .expect(1)
        .mount(&server)
        .await;

    let registers = client_for(&server).registers(TOKEN, true).await.unwrap();
    assert_eq!(registers.len(), 2);
    assert_eq!(registers[1].name, "Kiosk");
    assert!(registers[0].active);
}

#[tokio::test]
async fn lookup_record_defaults_active_when_missing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(EXPENSE_CATEGORIES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 9, "name": "Rent" }])))
        .mount(&server)
        .await;

    let categories = client_for(&server).expense_categories(TOKEN, true).await.unwrap();
    assert_eq!(categories, vec![LookupRecord { id: 9, name: "Rent".to_owned(), active: true }]);
}

#[tokio::test]
async fn load_income_references_returns_both_collections() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(REGISTERS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(lookup_list(&["Main"])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(INCOME_CATEGORIES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(lookup_list(&["Sales", "Services"])))
        .mount(&server)
        .await;

    let refs = client_for(&server).load_income_references(TOKEN).await;
    assert_eq!(refs.registers.len(), 1);
    assert_eq!(refs.categories.len(), 2);
}

#[tokio::test]
async fn load_expense_references_degrades_failed_collection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(REGISTERS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(lookup_list(&["Main", "Safe"])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(EXPENSE_CATEGORIES_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "boom" })))
        .expect(1)
        .mount(&server)
        .await;

    let refs = client_for(&server).load_expense_references(TOKEN).await;
    assert_eq!(refs.registers.len(), 2);
    assert!(refs.categories.is_empty());
}

#[tokio::test]
async fn create_income_returns_server_record_with_audit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(INCOMES_PATH))
        .and(header("authorization", "Bearer tok-123"))
        .and(body_json(json!({
            "register_id": 1,
            "category_id": 4,
            "amount": 1500.5,
            "date": "2026-10-01",
            "description": "Daily sales"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 77,
            "amount": 1500.5,
            "date": "2026-10-01",
            "description": "Daily sales",
            "register_id": 1,
            "created_at": "2026-10-01T12:00:00Z",
            "created_by": "agomez"
        })))
        .mount(&server)
        .await;

    let record = client_for(&server).create_income(TOKEN, &sample_income()).await.unwrap();
    assert_eq!(record.id, 77);
    assert_eq!(record.audit.created_by.as_deref(), Some("agomez"));
    assert_eq!(record.audit.created_at.as_deref(), Some("2026-10-01T12:00:00Z"));
    assert_eq!(record.extra.get("register_id"), Some(&json!(1)));
}

#[tokio::test]
async fn mutation_rejection_carries_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TRANSFERS_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "message": ["insufficient balance"] })))
        .mount(&server)
        .await;

    let transfer = NewTransfer {
        from_register_id: 1,
        to_register_id: 2,
        amount: 10.0,
        date: "2026-10-02".to_owned(),
        description: None,
    };
    let err = client_for(&server).create_transfer(TOKEN, &transfer).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.user_message(), "insufficient balance");
}

#[tokio::test]
async fn mutation_rejection_without_message_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(EXPENSES_PATH))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let expense = NewExpense {
        register_id: 1,
        category_id: 2,
        amount: 3.0,
        date: "2026-10-02".to_owned(),
        description: None,
    };
    let err = client_for(&server).create_expense(TOKEN, &expense).await.unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert_eq!(err.user_message(), SAVE_FALLBACK_MESSAGE);
}

#[tokio::test]
async fn dashboard_summary_tolerates_missing_series() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DASHBOARD_SUMMARY_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "metrics": [{ "label": "Balance", "value": 1200.0 }] })),
        )
        .mount(&server)
        .await;

    let summary = client_for(&server).dashboard_summary(TOKEN).await.unwrap();
    assert_eq!(summary.metrics.len(), 1);
    assert!(summary.series.is_empty());
}

#[tokio::test]
async fn transport_failure_maps_to_fallback() {
    let client = ApiClient::new(reqwest::Client::new(), "http://127.0.0.1:9");
    let err = client.incomes(TOKEN).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(err.status(), None);
    assert_eq!(err.user_message(), SAVE_FALLBACK_MESSAGE);
}

// =============================================================================
// validation
// =============================================================================

#[test]
fn validate_amount_rejects_non_positive() {
    assert!(validate_amount(0.0).is_err());
    assert!(validate_amount(-5.0).is_err());
    assert!(validate_amount(f64::NAN).is_err());
    assert!(validate_amount(0.01).is_ok());
}

#[test]
fn transfer_between_same_register_is_invalid() {
    let transfer = NewTransfer {
        from_register_id: 3,
        to_register_id: 3,
        amount: 10.0,
        date: "2026-10-02".to_owned(),
        description: None,
    };
    assert_eq!(transfer.validate(), Err("Source and destination registers must differ."));
}
