use std::sync::Arc;

use axum::{
    extract::{Extension, Json, State},
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde_json::{json, Value};
use tracing::debug;

use shared_models::auth::{TokenResponse, User};
use shared_models::error::AppError;
use shared_utils::jwt::validate_token;
use shared_utils::AppState;

use crate::models::{LoginRequest, LoginResponse};
use crate::services::AuthService;

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let service = AuthService::new(&state.config, &state.repositories);
    let response = service.login(&request.username, &request.password).await?;

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn me(
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    debug!("Getting profile for user: {}", user.id);

    Ok(Json(json!({
        "user_id": user.id,
        "username": user.username,
        "employee_num": user.employee_num
    })))
}

/// Reports whether the bearer token is valid; never fails on a bad token.
#[axum::debug_handler]
pub async fn verify_token(
    State(state): State<Arc<AppState>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Value>, AppError> {
    debug!("Verifying token");

    match validate_token(auth.token(), &state.config.jwt_secret) {
        Ok(user) => Ok(Json(json!(TokenResponse {
            valid: true,
            user_id: user.id,
            username: user.username,
            employee_num: user.employee_num,
        }))),
        Err(reason) => {
            debug!("Token rejected: {}", reason);
            Ok(Json(json!({ "valid": false })))
        }
    }
}
