use std::sync::Arc;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;

use prescription_cell::router::prescription_routes;
use shared_database::PatientRepository;
use shared_models::{NewPatient, StaffRole};
use shared_utils::test_utils::{seed_staff, JwtTestUtils, TestConfig, TestUser};
use shared_utils::AppState;

async fn send(state: &Arc<AppState>, token: &str, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .header("content-type", "application/json")
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = prescription_routes(state.clone()).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_doctor_issues_and_cancels_prescription() {
    let config = TestConfig::default();
    let state = config.to_state();
    let doctor = seed_staff(&state.repositories, "David", "DC001", StaffRole::Doctor).await.unwrap();
    state.repositories.patients.insert_patient(NewPatient {
        name: "Alice".to_string(),
        address: "1 High Street".to_string(),
        phone: "0123456789".to_string(),
        doctor_id: Some(doctor.id),
    }).await.unwrap();
    let token = JwtTestUtils::create_test_token(&TestUser::new("david", "DC001"), &config.jwt_secret, None);

    let (status, body) = send(&state, &token, "POST", "/", Some(json!({
        "medicine_type": "tablet",
        "patient_name": "Alice",
        "quantity": 14,
        "dosage": 0.55
    }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["prescription"]["medicine_type"], "Tablet");
    assert_eq!(body["prescription"]["doctor_id"], doctor.id.to_string());
    let id = body["prescription"]["id"].as_str().unwrap().to_string();

    let (_, body) = send(&state, &token, "GET", "/", None).await;
    assert_eq!(body["total"], 1);

    let (status, _) = send(&state, &token, "POST", &format!("/{}/cancel", id), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&state, &token, "POST", &format!("/{}/cancel", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unregistered_patient_is_not_found() {
    let config = TestConfig::default();
    let state = config.to_state();
    seed_staff(&state.repositories, "David", "DC001", StaffRole::Doctor).await.unwrap();
    let token = JwtTestUtils::create_test_token(&TestUser::new("david", "DC001"), &config.jwt_secret, None);

    let (status, body) = send(&state, &token, "POST", "/", Some(json!({
        "medicine_type": "Powder",
        "patient_name": "Bob",
        "quantity": 1,
        "dosage": 1.0
    }))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("register the patient"));
}

#[tokio::test]
async fn test_nurse_cannot_issue() {
    let config = TestConfig::default();
    let state = config.to_state();
    seed_staff(&state.repositories, "Nina", "NR001", StaffRole::Nurse).await.unwrap();
    let token = JwtTestUtils::create_test_token(&TestUser::new("nina", "NR001"), &config.jwt_secret, None);

    let (status, _) = send(&state, &token, "GET", "/", None).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}
