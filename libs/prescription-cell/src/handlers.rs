use std::sync::Arc;
use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::auth::User;
use shared_models::error::AppError;
use shared_utils::AppState;
use staff_cell::require_doctor;

use crate::models::IssuePrescriptionRequest;
use crate::services::PrescriptionService;

#[axum::debug_handler]
pub async fn list_prescriptions(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    require_doctor(state.repositories.staff.as_ref(), &user, "view prescriptions").await?;

    let prescriptions = PrescriptionService::new(&state.repositories).list_prescriptions().await?;

    Ok(Json(json!({
        "prescriptions": prescriptions,
        "total": prescriptions.len()
    })))
}

#[axum::debug_handler]
pub async fn issue_prescription(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Json(request): Json<IssuePrescriptionRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let doctor = require_doctor(state.repositories.staff.as_ref(), &user, "issue prescriptions").await?;

    let prescription = PrescriptionService::new(&state.repositories)
        .issue_prescription(&doctor, request)
        .await?;

    Ok((StatusCode::CREATED, Json(json!({
        "success": true,
        "prescription": prescription,
        "message": "Succeeded issuing prescription."
    }))))
}

#[axum::debug_handler]
pub async fn cancel_prescription(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(prescription_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    require_doctor(state.repositories.staff.as_ref(), &user, "cancel prescriptions").await?;

    let prescription = PrescriptionService::new(&state.repositories)
        .cancel_prescription(prescription_id)
        .await?;

    Ok(Json(json!({
        "success": true,
        "prescription": prescription,
        "message": format!("Canceled prescription:{}", prescription_id)
    })))
}
