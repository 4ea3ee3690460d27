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

use crate::models::RegisterStaffRequest;
use crate::services::authorization::require_doctor;
use crate::services::staff::StaffService;

#[axum::debug_handler]
pub async fn list_staff(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    require_doctor(state.repositories.staff.as_ref(), &user, "view healthcare professionals").await?;

    let staff = StaffService::new(&state.repositories).list_staff().await?;

    Ok(Json(json!({
        "staff": staff,
        "total": staff.len()
    })))
}

#[axum::debug_handler]
pub async fn register_staff(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Json(request): Json<RegisterStaffRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    require_doctor(state.repositories.staff.as_ref(), &user, "register healthcare professionals").await?;

    let staff = StaffService::new(&state.repositories).register_staff(request).await?;

    Ok((StatusCode::CREATED, Json(json!({
        "success": true,
        "staff": staff,
        "message": format!("Registered {}", staff.name)
    }))))
}

#[axum::debug_handler]
pub async fn delete_staff(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(staff_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    require_doctor(state.repositories.staff.as_ref(), &user, "delete healthcare professionals").await?;

    let staff = StaffService::new(&state.repositories).delete_staff(staff_id).await?;

    Ok(Json(json!({
        "success": true,
        "message": format!("Deleted {}", staff.name)
    })))
}
