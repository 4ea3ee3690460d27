use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_database::DatabaseError;
use shared_models::error::AppError;
use shared_models::staff::{EMPLOYEE_NUM_MAX_LEN, STAFF_NAME_MAX_LEN};
use shared_models::{NewStaffMember, StaffRole};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterStaffRequest {
    pub name: String,
    pub employee_num: String,
    pub employee_type: StaffRole,
}

impl RegisterStaffRequest {
    pub fn validate(&self) -> Result<NewStaffMember, StaffError> {
        let name = self.name.trim();
        let employee_num = self.employee_num.trim();

        if name.is_empty() {
            return Err(StaffError::ValidationError("Name is required".to_string()));
        }
        if name.chars().count() > STAFF_NAME_MAX_LEN {
            return Err(StaffError::ValidationError(format!(
                "Name must be at most {} characters", STAFF_NAME_MAX_LEN
            )));
        }
        if employee_num.is_empty() {
            return Err(StaffError::ValidationError("Employee number is required".to_string()));
        }
        if employee_num.chars().count() > EMPLOYEE_NUM_MAX_LEN {
            return Err(StaffError::ValidationError(format!(
                "Employee number must be at most {} characters", EMPLOYEE_NUM_MAX_LEN
            )));
        }

        Ok(NewStaffMember {
            name: name.to_string(),
            employee_num: employee_num.to_string(),
            role: self.employee_type,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StaffError {
    #[error("Healthcare professional {0} not found")]
    NotFound(Uuid),

    #[error("{0} is already registered")]
    NameTaken(String),

    #[error("Employee number {0} is already registered")]
    EmployeeNumTaken(String),

    #[error("Only doctors can {0}")]
    DoctorOnly(&'static str),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Repository error: {0}")]
    Repository(#[from] DatabaseError),
}

impl From<StaffError> for AppError {
    fn from(error: StaffError) -> Self {
        let message = error.to_string();
        match error {
            StaffError::NotFound(_) => AppError::NotFound(message),
            StaffError::NameTaken(_) | StaffError::EmployeeNumTaken(_) => AppError::Conflict(message),
            StaffError::DoctorOnly(_) => AppError::Forbidden(message),
            StaffError::ValidationError(_) => AppError::ValidationError(message),
            StaffError::Repository(_) => AppError::Database(message),
        }
    }
}
