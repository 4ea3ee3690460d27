// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::auth::User;
use shared_models::error::AppError;
use shared_utils::AppState;

use crate::models::{AvailabilityQuery, AvailabilityResponse, BookAppointmentRequest, BookingAgent};
use crate::services::booking::AppointmentBookingService;
use crate::slot::Slot;

async fn booking_service(state: &AppState, user: &User) -> Result<AppointmentBookingService, AppError> {
    Ok(AppointmentBookingService::new(BookingAgent::from(user), &state.repositories).await?)
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let service = booking_service(&state, &user).await?;
    let appointments = service.schedule().list();

    Ok(Json(json!({
        "appointments": appointments,
        "total": appointments.len(),
        "next_available": service.find_next_available(),
    })))
}

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let mut service = booking_service(&state, &user).await?;
    let outcome = service.book_appointment(request).await?;

    Ok((StatusCode::CREATED, Json(json!({
        "success": true,
        "appointment": outcome.appointment,
        "patient": outcome.patient,
        "patient_registered": outcome.patient_registered,
        "message": "Succeeded making appointment."
    }))))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let mut service = booking_service(&state, &user).await?;
    let appointment = service.cancel_appointment(appointment_id).await?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "message": format!("Canceled appointment:{}", appointment_id)
    })))
}

#[axum::debug_handler]
pub async fn get_next_available(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let service = booking_service(&state, &user).await?;

    Ok(Json(json!({
        "next_available": service.find_next_available()
    })))
}

#[axum::debug_handler]
pub async fn check_availability(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let slot = Slot::new(query.date, query.hour)
        .map_err(|e| AppError::ValidationError(e.to_string()))?;
    let service = booking_service(&state, &user).await?;

    let available = service.check_available_date(slot).await?;

    Ok(Json(AvailabilityResponse {
        slot,
        available,
        next_available: service.find_next_available(),
    }))
}
