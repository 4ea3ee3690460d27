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

use crate::models::RegisterPatientRequest;
use crate::services::PatientService;

#[axum::debug_handler]
pub async fn list_patients(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    require_doctor(state.repositories.staff.as_ref(), &user, "view patients").await?;

    let patients = PatientService::new(&state.repositories).list_patients().await?;

    Ok(Json(json!({
        "patients": patients,
        "total": patients.len()
    })))
}

#[axum::debug_handler]
pub async fn register_patient(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Json(request): Json<RegisterPatientRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    require_doctor(state.repositories.staff.as_ref(), &user, "register patients").await?;

    let patient = PatientService::new(&state.repositories).register_patient(request).await?;

    Ok((StatusCode::CREATED, Json(json!({
        "success": true,
        "patient": patient,
        "message": format!("Registered patient {}", patient.name)
    }))))
}

#[axum::debug_handler]
pub async fn delete_patient(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    require_doctor(state.repositories.staff.as_ref(), &user, "delete patients").await?;

    let patient = PatientService::new(&state.repositories).delete_patient(patient_id).await?;

    Ok(Json(json!({
        "success": true,
        "message": format!("Deleted patient {}", patient.name)
    })))
}
