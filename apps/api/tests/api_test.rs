use std::sync::Arc;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{Days, Local};
use serde_json::{json, Value};
use tower::ServiceExt;

use shared_database::{Repositories, StaffRepository};
use shared_utils::test_utils::TestConfig;
use shared_utils::AppState;
use surgery_api::bootstrap::ensure_bootstrap_account;
use surgery_api::router::create_router;

async fn bootstrapped_app() -> Router {
    let mut config = TestConfig::default().to_app_config();
    config.bootstrap_username = "david".to_string();
    config.bootstrap_password = "s3cret".to_string();
    config.bootstrap_employee_num = "DC001".to_string();

    let repositories = Repositories::in_memory();
    assert!(ensure_bootstrap_account(&config, &repositories).await.unwrap());

    create_router(Arc::new(AppState::new(config, repositories)))
}

async fn call(app: &Router, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let request = builder
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn login(app: &Router) -> String {
    let (status, body) = call(app, "POST", "/auth/login", None, Some(json!({
        "username": "david",
        "password": "s3cret"
    }))).await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_root_is_public() {
    let app = bootstrapped_app().await;

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_clinic_day_end_to_end() {
    let app = bootstrapped_app().await;
    let token = login(&app).await;
    let tomorrow = Local::now().date_naive() + Days::new(1);

    let (status, _) = call(&app, "POST", "/staff", Some(&token), Some(json!({
        "name": "Nina",
        "employee_num": "NR001",
        "employee_type": "nurse"
    }))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = call(&app, "POST", "/patients", Some(&token), Some(json!({
        "name": "Alice",
        "address": "1 High Street",
        "phone": "0123456789",
        "doctor_name": "david"
    }))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call(&app, "POST", "/appointments", Some(&token), Some(json!({
        "appointment_type": "Surgery",
        "staff_name": "david",
        "patient_name": "Alice",
        "patient_address": "1 High Street",
        "patient_phone": "0123456789",
        "date": tomorrow,
        "hour": 9
    }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["patient_registered"], false);

    let (status, body) = call(&app, "GET", "/appointments/next-available", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["next_available"]["hour"], 11);

    let (status, body) = call(&app, "POST", "/prescriptions", Some(&token), Some(json!({
        "medicine_type": "Tablet",
        "patient_name": "Alice",
        "quantity": 10,
        "dosage": 2.0
    }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["prescription"]["quantity"], 10);
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = bootstrapped_app().await;

    for uri in ["/appointments", "/patients", "/staff", "/prescriptions", "/auth/me"] {
        let (status, _) = call(&app, "GET", uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
    }
}

#[tokio::test]
async fn test_bootstrap_is_idempotent() {
    let mut config = TestConfig::default().to_app_config();
    config.bootstrap_username = "david".to_string();
    config.bootstrap_password = "s3cret".to_string();
    config.bootstrap_employee_num = "DC001".to_string();
    let repositories = Repositories::in_memory();

    assert!(ensure_bootstrap_account(&config, &repositories).await.unwrap());
    assert!(!ensure_bootstrap_account(&config, &repositories).await.unwrap());

    let staff = repositories.staff.list_staff().await.unwrap();
    assert_eq!(staff.len(), 1);
    assert!(staff[0].is_doctor());
}

#[tokio::test]
async fn test_bootstrap_skipped_without_credentials() {
    let config = TestConfig::default().to_app_config();
    let repositories = Repositories::in_memory();

    assert!(!ensure_bootstrap_account(&config, &repositories).await.unwrap());
    assert!(repositories.staff.list_staff().await.unwrap().is_empty());
}
