//! End-to-end tests over the full router.
//!
//! These tests require a running database; set `DATABASE_URL` to enable them.
//! Without it every test returns early, so the suite passes on machines with
//! no database.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use krona_api::{AppState, create_router};

async fn try_router() -> Option<Router> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping");
        return None;
    };
    let db = Database::connect(&url)
        .await
        .expect("Failed to connect to database");
    Some(create_router(AppState { db: Arc::new(db) }))
}

fn unique_email(tag: &str) -> String {
    format!("{tag}-{}@example.com", Uuid::new_v4())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json_body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json_body.to_string()))
            .expect("request"),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

async fn create_client(app: &Router, name: &str, email: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/v1/clients",
        Some(json!({ "name": name, "email": email, "phone": "+12345678901" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().expect("client id")
}

#[tokio::test]
async fn test_health_reports_healthy() {
    let Some(app) = try_router().await else {
        return;
    };

    let (status, body) = send(&app, "GET", "/api/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_create_client_normalizes_padded_input() {
    let Some(app) = try_router().await else {
        return;
    };

    let email_raw = format!(" User-{}@Example.com ", Uuid::new_v4());
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/clients",
        Some(json!({ "name": "  James  ", "email": email_raw, "phone": " +12345678901 " })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "James");
    assert_eq!(body["email"], email_raw.trim().to_lowercase());
    assert_eq!(body["phone"], "+12345678901");
    assert_eq!(body["status"], "active");

    let id = body["id"].as_i64().expect("client id");
    let (status, fetched) = send(&app, "GET", &format!("/api/v1/clients/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["email"], email_raw.trim().to_lowercase());
}

#[tokio::test]
async fn test_create_client_rejects_invalid_payload() {
    let Some(app) = try_router().await else {
        return;
    };

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/clients",
        Some(json!({ "name": "James", "email": "broken", "phone": "+12345678901" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/clients",
        Some(json!({ "name": "James", "email": unique_email("valid"), "phone": "12345" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_email_returns_conflict() {
    let Some(app) = try_router().await else {
        return;
    };

    let email = unique_email("dup");
    create_client(&app, "First", &email).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/clients",
        Some(json!({ "name": "Second", "email": email.to_uppercase(), "phone": "+12345678901" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_client_status_and_delete_flow() {
    let Some(app) = try_router().await else {
        return;
    };

    let id = create_client(&app, "Flow", &unique_email("flow")).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/clients/{id}/status"),
        Some(json!({ "status": "blocked" })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (_, fetched) = send(&app, "GET", &format!("/api/v1/clients/{id}"), None).await;
    assert_eq!(fetched["status"], "blocked");

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/clients/{id}/status"),
        Some(json!({ "status": "paused" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");

    let (status, _) = send(&app, "DELETE", &format!("/api/v1/clients/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &format!("/api/v1/clients/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_client_keeps_omitted_fields() {
    let Some(app) = try_router().await else {
        return;
    };

    let email = unique_email("update");
    let id = create_client(&app, "Before", &email).await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/v1/clients/{id}"),
        Some(json!({ "phone": "+19998887766" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phone"], "+19998887766");
    assert_eq!(body["name"], "Before");
    assert_eq!(body["email"], email);
}

#[tokio::test]
async fn test_account_lifecycle_end_to_end() {
    let Some(app) = try_router().await else {
        return;
    };

    let client_id = create_client(&app, "James", &unique_email("lifecycle")).await;
    let base = format!("/api/v1/clients/{client_id}/accounts");

    let (status, account) = send(&app, "POST", &base, Some(json!({ "type": "debit" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(account["status"], "active");
    assert_eq!(account["type"], "debit");
    assert_eq!(account["plan"], "basic");
    assert!(!account["account_number"].as_str().expect("number").is_empty());
    let balance: Decimal = account["balance"]
        .as_str()
        .expect("balance string")
        .parse()
        .expect("decimal balance");
    assert_eq!(balance, dec!(0));

    let account_id = account["id"].as_i64().expect("account id");

    let (status, updated) = send(
        &app,
        "PATCH",
        &format!("{base}/{account_id}/plan"),
        Some(json!({ "plan": "premium" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["plan"], "premium");

    let (status, closed) = send(&app, "POST", &format!("{base}/{account_id}/close"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(closed["status"], "closed");

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("{base}/{account_id}/plan"),
        Some(json!({ "plan": "standard" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");

    // Reads are still allowed after close and see the pre-close plan.
    let (status, fetched) = send(&app, "GET", &format!("{base}/{account_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["status"], "closed");
    assert_eq!(fetched["plan"], "premium");
}

#[tokio::test]
async fn test_close_is_idempotent_over_http() {
    let Some(app) = try_router().await else {
        return;
    };

    let client_id = create_client(&app, "Idem", &unique_email("idem")).await;
    let base = format!("/api/v1/clients/{client_id}/accounts");

    let (_, account) = send(&app, "POST", &base, Some(json!({ "type": "savings" }))).await;
    let account_id = account["id"].as_i64().expect("account id");

    for _ in 0..2 {
        let (status, body) =
            send(&app, "POST", &format!("{base}/{account_id}/close"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "closed");
    }
}

#[tokio::test]
async fn test_account_under_wrong_client_behaves_as_missing() {
    let Some(app) = try_router().await else {
        return;
    };

    let owner_id = create_client(&app, "Owner", &unique_email("owner")).await;
    let other_id = create_client(&app, "Other", &unique_email("other")).await;

    let (_, account) = send(
        &app,
        "POST",
        &format!("/api/v1/clients/{owner_id}/accounts"),
        Some(json!({ "type": "credit" })),
    )
    .await;
    let account_id = account["id"].as_i64().expect("account id");

    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/v1/clients/{other_id}/accounts/{account_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/api/v1/clients/{other_id}/accounts/{account_id}/status"),
        Some(json!({ "status": "closed" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_listing_orders_accounts_newest_first() {
    let Some(app) = try_router().await else {
        return;
    };

    let client_id = create_client(&app, "Order", &unique_email("order")).await;
    let base = format!("/api/v1/clients/{client_id}/accounts");

    let mut created = Vec::new();
    for _ in 0..3 {
        let (status, account) = send(&app, "POST", &base, Some(json!({ "type": "debit" }))).await;
        assert_eq!(status, StatusCode::CREATED);
        created.push(account["id"].as_i64().expect("account id"));
    }

    let (status, body) = send(&app, "GET", &base, None).await;
    assert_eq!(status, StatusCode::OK);
    let listed: Vec<i64> = body["accounts"]
        .as_array()
        .expect("accounts array")
        .iter()
        .map(|a| a["id"].as_i64().expect("account id"))
        .collect();

    created.reverse();
    assert_eq!(listed, created);
}
