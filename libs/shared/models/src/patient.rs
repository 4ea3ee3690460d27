use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub phone: String,
    /// Primary doctor. Patients registered at reception while booking have none.
    pub doctor_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPatient {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub doctor_id: Option<Uuid>,
}

pub const PATIENT_NAME_MAX_LEN: usize = 32;
pub const PATIENT_ADDRESS_MAX_LEN: usize = 64;
pub const PATIENT_PHONE_MAX_LEN: usize = 15;

/// Field rules shared by every path that creates a patient.
pub fn validate_patient_details(name: &str, address: &str, phone: &str) -> Result<(), String> {
    for (field, value, max) in [
        ("name", name, PATIENT_NAME_MAX_LEN),
        ("address", address, PATIENT_ADDRESS_MAX_LEN),
        ("phone", phone, PATIENT_PHONE_MAX_LEN),
    ] {
        if value.trim().is_empty() {
            return Err(format!("Patient {} is required", field));
        }
        if value.chars().count() > max {
            return Err(format!("Patient {} must be at most {} characters", field, max));
        }
    }
    Ok(())
}
