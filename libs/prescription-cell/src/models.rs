use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use uuid::Uuid;

use shared_database::DatabaseError;
use shared_models::error::AppError;
use shared_models::MedicineType;

pub const QUANTITY_RANGE: RangeInclusive<i32> = 1..=30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuePrescriptionRequest {
    pub medicine_type: MedicineType,
    pub patient_name: String,
    pub quantity: i32,
    pub dosage: f64,
}

impl IssuePrescriptionRequest {
    /// Checks the amounts and returns the dosage rounded to one decimal place.
    pub fn validate(&self) -> Result<f64, PrescriptionError> {
        if self.patient_name.trim().is_empty() {
            return Err(PrescriptionError::ValidationError("Patient name is required".to_string()));
        }
        if !QUANTITY_RANGE.contains(&self.quantity) {
            return Err(PrescriptionError::ValidationError(format!(
                "Quantity must be between {} and {}",
                QUANTITY_RANGE.start(),
                QUANTITY_RANGE.end()
            )));
        }

        let dosage = round_dosage(self.dosage);
        if !dosage.is_finite() || dosage <= 0.0 {
            return Err(PrescriptionError::ValidationError(
                "Dosage must be greater than 0".to_string(),
            ));
        }
        Ok(dosage)
    }
}

pub fn round_dosage(dosage: f64) -> f64 {
    (dosage * 10.0).round() / 10.0
}

#[derive(Debug, thiserror::Error)]
pub enum PrescriptionError {
    #[error("Prescription {0} not found")]
    NotFound(Uuid),

    #[error("Patient {0} is not registered. Please register the patient first.")]
    PatientNotRegistered(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Repository error: {0}")]
    Repository(#[from] DatabaseError),
}

impl From<PrescriptionError> for AppError {
    fn from(error: PrescriptionError) -> Self {
        let message = error.to_string();
        match error {
            PrescriptionError::NotFound(_) | PrescriptionError::PatientNotRegistered(_) => {
                AppError::NotFound(message)
            }
            PrescriptionError::ValidationError(_) => AppError::ValidationError(message),
            PrescriptionError::Repository(_) => AppError::Database(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(quantity: i32, dosage: f64) -> IssuePrescriptionRequest {
        IssuePrescriptionRequest {
            medicine_type: MedicineType::Tablet,
            patient_name: "Alice".to_string(),
            quantity,
            dosage,
        }
    }

    #[test]
    fn dosage_is_rounded_to_one_decimal() {
        assert_eq!(request(1, 2.46).validate().unwrap(), 2.5);
        assert_eq!(request(30, 0.14).validate().unwrap(), 0.1);
    }

    #[test]
    fn quantity_bounds() {
        assert!(request(0, 1.0).validate().is_err());
        assert!(request(31, 1.0).validate().is_err());
        assert!(request(1, 1.0).validate().is_ok());
        assert!(request(30, 1.0).validate().is_ok());
    }

    #[test]
    fn dosage_that_rounds_to_zero_is_rejected() {
        assert!(matches!(request(1, 0.04).validate(), Err(PrescriptionError::ValidationError(_))));
        assert!(matches!(request(1, -1.0).validate(), Err(PrescriptionError::ValidationError(_))));
        assert!(matches!(request(1, f64::NAN).validate(), Err(PrescriptionError::ValidationError(_))));
    }
}
