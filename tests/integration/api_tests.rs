//! API integration tests
//!
//! Expect a server on localhost:8080 backed by an empty, migrated database.

use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Suffix that keeps names unique across runs
fn unique(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    format!("{}-{}", prefix, nanos)
}

async fn post_json(client: &Client, path: &str, body: Value) -> (u16, Value) {
    let response = client
        .post(format!("{}{}", BASE_URL, path))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status().as_u16();
    let body = response.json().await.unwrap_or(Value::Null);
    (status, body)
}

/// Creates a manufacturer, model and status; returns (model_id, status_id)
async fn seed_catalog(client: &Client) -> (i64, i64) {
    let (_, manufacturer) = post_json(
        client,
        "/manufacturers",
        json!({ "name": unique("Lenovo") }),
    )
    .await;
    let (_, model) = post_json(
        client,
        "/asset-models",
        json!({
            "manufacturer_id": manufacturer["id"],
            "name": unique("ThinkPad T14")
        }),
    )
    .await;
    let (_, status) = post_json(
        client,
        "/asset-statuses",
        json!({ "name": unique("Deployed") }),
    )
    .await;

    (
        model["id"].as_i64().expect("model id"),
        status["id"].as_i64().expect("status id"),
    )
}

async fn create_asset(client: &Client, extra: Value) -> Value {
    let (model_id, status_id) = seed_catalog(client).await;
    let mut body = json!({
        "asset_tag": unique("LT"),
        "model_id": model_id,
        "status_id": status_id
    });
    if let (Some(body), Some(extra)) = (body.as_object_mut(), extra.as_object()) {
        body.extend(extra.clone());
    }

    let (status, asset) = post_json(client, "/assets", body).await;
    assert_eq!(status, 201, "asset creation failed: {}", asset);
    asset
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_ready_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_asset_without_purchase_data() {
    let client = Client::new();
    let asset = create_asset(&client, json!({})).await;

    assert!(asset["warranty_expiry"].is_null());
    assert_eq!(asset["age_in_months"], 0);
    assert_eq!(asset["warranty_status"]["state"], "unknown");
    assert_eq!(asset["warranty_months"], 12);
    assert_eq!(asset["depreciation_rate"], 20.0);
}

#[tokio::test]
#[ignore]
async fn test_warranty_expiry_is_computed() {
    let client = Client::new();
    let asset = create_asset(
        &client,
        json!({
            "purchase_date": "2024-01-15",
            "purchase_cost": "1000.00",
            "warranty_months": 12
        }),
    )
    .await;

    assert_eq!(asset["warranty_expiry"], "2025-01-15");
}

#[tokio::test]
#[ignore]
async fn test_duplicate_asset_tag() {
    let client = Client::new();
    let asset = create_asset(&client, json!({})).await;

    let (status, body) = post_json(
        &client,
        "/assets",
        json!({
            "asset_tag": asset["asset_tag"],
            "model_id": asset["model_id"],
            "status_id": asset["status_id"]
        }),
    )
    .await;

    assert_eq!(status, 409);
    assert_eq!(body["error"], "Duplicate");
}

#[tokio::test]
#[ignore]
async fn test_negative_purchase_cost_rejected() {
    let client = Client::new();
    let (model_id, status_id) = seed_catalog(&client).await;

    let (status, body) = post_json(
        &client,
        "/assets",
        json!({
            "asset_tag": unique("NEG"),
            "model_id": model_id,
            "status_id": status_id,
            "purchase_cost": "-5.00"
        }),
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "BadValue");
}

#[tokio::test]
#[ignore]
async fn test_unknown_model_is_invalid_reference() {
    let client = Client::new();
    let (_, status_id) = seed_catalog(&client).await;

    let (status, body) = post_json(
        &client,
        "/assets",
        json!({
            "asset_tag": unique("ORPHAN"),
            "model_id": 999_999_999,
            "status_id": status_id
        }),
    )
    .await;

    assert_eq!(status, 409);
    assert_eq!(body["error"], "InvalidReference");
}

#[tokio::test]
#[ignore]
async fn test_get_unknown_asset() {
    let client = Client::new();

    let response = client
        .get(format!("{}/assets/999999999", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_audit_and_assignment() {
    let client = Client::new();
    let asset = create_asset(&client, json!({})).await;
    let id = asset["id"].as_i64().expect("asset id");

    let (status, audited) = post_json(
        &client,
        &format!("/assets/{}/audit", id),
        json!({ "audit_date": "2024-05-02" }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(audited["last_audit"], "2024-05-02");

    let (_, user) = post_json(&client, "/users", json!({ "username": unique("jdoe") })).await;
    let response = client
        .put(format!("{}/assets/{}/assignment", BASE_URL, id))
        .json(&json!({ "user_id": user["id"] }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let assigned: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(assigned["assigned_to_id"], user["id"]);
}

#[tokio::test]
#[ignore]
async fn test_maintenance_lifecycle() {
    let client = Client::new();
    let asset = create_asset(&client, json!({})).await;

    let (status, record) = post_json(
        &client,
        "/maintenance",
        json!({
            "asset_id": asset["id"],
            "title": "Replace keyboard",
            "description": "Several keys unresponsive",
            "scheduled_date": "2020-01-01"
        }),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(record["status"], "open");
    assert_eq!(record["priority"], "medium");
    assert_eq!(record["is_overdue"], true);
    assert_eq!(record["days_open"]["kind"], "ongoing");

    let id = record["id"].as_i64().expect("record id");

    // cost is only accepted when completing
    let (status, _) = post_json(
        &client,
        &format!("/maintenance/{}/status", id),
        json!({ "status": "in_progress", "cost": "10.00" }),
    )
    .await;
    assert_eq!(status, 400);

    let (status, completed) = post_json(
        &client,
        &format!("/maintenance/{}/status", id),
        json!({ "status": "completed", "cost": "45.50", "resolution": "Keyboard replaced" }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(completed["is_overdue"], false);
    assert!(completed["completed_date"].is_string());
    assert_eq!(completed["days_open"]["kind"], "finalized");

    let history = client
        .get(format!("{}/assets/{}/maintenance", BASE_URL, asset["id"]))
        .send()
        .await
        .expect("Failed to send request");
    let history: Value = history.json().await.expect("Failed to parse response");
    assert_eq!(history.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
#[ignore]
async fn test_maintenance_for_unknown_asset() {
    let client = Client::new();

    let (status, body) = post_json(
        &client,
        "/maintenance",
        json!({
            "asset_id": 999_999_999,
            "title": "Ghost",
            "description": "No such asset",
            "scheduled_date": "2024-01-01"
        }),
    )
    .await;

    assert_eq!(status, 409);
    assert_eq!(body["error"], "InvalidReference");
}

#[tokio::test]
#[ignore]
async fn test_reports() {
    let client = Client::new();

    for path in [
        "/assets/warranty-expiring?days=60",
        "/assets/needs-audit",
        "/maintenance/overdue",
    ] {
        let response = client
            .get(format!("{}{}", BASE_URL, path))
            .send()
            .await
            .expect("Failed to send request");
        assert!(response.status().is_success(), "{} failed", path);
        let body: Value = response.json().await.expect("Failed to parse response");
        assert!(body.is_array());
    }

    let response = client
        .get(format!("{}/assets/valuation-summary", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    let summary: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(summary["strategy"], "power_of_rate");

    let response = client
        .get(format!("{}/assets/needs-audit?days=-3", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}
