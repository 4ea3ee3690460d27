use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_database::DatabaseError;
use shared_models::error::AppError;
use shared_models::patient::validate_patient_details;

/// Upper bound on patients registered under one primary doctor.
pub const MAX_PATIENTS_PER_DOCTOR: usize = 500;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterPatientRequest {
    pub name: String,
    pub address: String,
    pub phone: String,
    /// Name of the patient's primary doctor.
    pub doctor_name: String,
}

impl RegisterPatientRequest {
    pub fn validate(&self) -> Result<(), PatientError> {
        validate_patient_details(&self.name, &self.address, &self.phone)
            .map_err(PatientError::ValidationError)?;

        if self.doctor_name.trim().is_empty() {
            return Err(PatientError::ValidationError("Doctor's name is required".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PatientError {
    #[error("Patient {0} not found")]
    NotFound(Uuid),

    #[error("Patient {0} is already registered")]
    AlreadyRegistered(String),

    #[error("Cannot find the doctor {0}. Please confirm the name.")]
    DoctorNotFound(String),

    #[error("Dr. {0} already has {max} patients", max = MAX_PATIENTS_PER_DOCTOR)]
    DoctorAtCapacity(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Repository error: {0}")]
    Repository(#[from] DatabaseError),
}

impl From<PatientError> for AppError {
    fn from(error: PatientError) -> Self {
        let message = error.to_string();
        match error {
            PatientError::NotFound(_) | PatientError::DoctorNotFound(_) => AppError::NotFound(message),
            PatientError::AlreadyRegistered(_) => AppError::Conflict(message),
            PatientError::DoctorAtCapacity(_) | PatientError::ValidationError(_) => {
                AppError::ValidationError(message)
            }
            PatientError::Repository(_) => AppError::Database(message),
        }
    }
}
