// libs/appointment-cell/src/models.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use shared_database::DatabaseError;
use shared_models::auth::User;
use shared_models::error::AppError;
use shared_models::patient::validate_patient_details;
use shared_models::staff::STAFF_NAME_MAX_LEN;
use shared_models::{Appointment, AppointmentType, Patient};

use crate::slot::{Slot, SlotError};

// ==============================================================================
// BOOKING AGENT
// ==============================================================================

/// The staff member operating the reception desk; recorded on every booking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingAgent {
    pub name: String,
    pub employee_num: String,
}

impl From<&User> for BookingAgent {
    fn from(user: &User) -> Self {
        Self {
            name: user.username.clone(),
            employee_num: user.employee_num.clone(),
        }
    }
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub appointment_type: AppointmentType,
    pub staff_name: String,
    pub patient_name: String,
    /// Used only when the patient is not registered yet.
    pub patient_address: String,
    pub patient_phone: String,
    pub date: NaiveDate,
    pub hour: u32,
}

impl BookAppointmentRequest {
    pub fn validate(&self) -> Result<Slot, AppointmentError> {
        if self.staff_name.trim().is_empty() {
            return Err(AppointmentError::ValidationError("Doctor's name is required".to_string()));
        }
        if self.staff_name.chars().count() > STAFF_NAME_MAX_LEN {
            return Err(AppointmentError::ValidationError(format!(
                "Doctor's name must be at most {} characters", STAFF_NAME_MAX_LEN
            )));
        }
        validate_patient_details(&self.patient_name, &self.patient_address, &self.patient_phone)
            .map_err(AppointmentError::ValidationError)?;

        Ok(Slot::new(self.date, self.hour)?)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingOutcome {
    pub appointment: Appointment,
    pub patient: Patient,
    /// True when the patient was created as part of this booking.
    pub patient_registered: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
    pub hour: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityResponse {
    pub slot: Slot,
    pub available: bool,
    pub next_available: Slot,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    /// Bookings open from tomorrow onwards.
    BeforeCutoff,
    AlreadyBooked,
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnavailableReason::BeforeCutoff => write!(f, "please select any day from tomorrow"),
            UnavailableReason::AlreadyBooked => write!(f, "already booked"),
        }
    }
}

fn next_available_hint(next: &Option<Slot>) -> String {
    match next {
        Some(slot) => format!(". Next available date is {}", slot),
        None => String::new(),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppointmentError {
    #[error("Cannot find the doctor {0}. Please confirm the name.")]
    StaffNotFound(String),

    #[error("Appointment {0} not found")]
    AppointmentNotFound(Uuid),

    #[error("{slot} is not available: {reason}{}", next_available_hint(.next_available))]
    SlotUnavailable {
        slot: Slot,
        reason: UnavailableReason,
        next_available: Option<Slot>,
    },

    #[error("Appointment {0} is not tracked by this schedule")]
    NotTracked(Uuid),

    #[error("Invalid slot: {0}")]
    InvalidSlot(#[from] SlotError),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Repository error: {0}")]
    Repository(#[from] DatabaseError),
}

impl From<AppointmentError> for AppError {
    fn from(error: AppointmentError) -> Self {
        let message = error.to_string();
        match error {
            AppointmentError::StaffNotFound(_) | AppointmentError::AppointmentNotFound(_) => {
                AppError::NotFound(message)
            }
            AppointmentError::SlotUnavailable { .. } | AppointmentError::NotTracked(_) => {
                AppError::Conflict(message)
            }
            AppointmentError::InvalidSlot(_) | AppointmentError::ValidationError(_) => {
                AppError::ValidationError(message)
            }
            AppointmentError::Repository(_) => AppError::Database(message),
        }
    }
}
