use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A healthcare professional. Doctors and nurses share one record shape and
/// are told apart by `role`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StaffMember {
    pub id: Uuid,
    pub name: String,
    pub employee_num: String,
    #[serde(rename = "employee_type")]
    pub role: StaffRole,
    pub created_at: DateTime<Utc>,
}

impl StaffMember {
    pub fn is_doctor(&self) -> bool {
        matches!(self.role, StaffRole::Doctor)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    Doctor,
    Nurse,
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StaffRole::Doctor => write!(f, "doctor"),
            StaffRole::Nurse => write!(f, "nurse"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStaffMember {
    pub name: String,
    pub employee_num: String,
    #[serde(rename = "employee_type")]
    pub role: StaffRole,
}

pub const STAFF_NAME_MAX_LEN: usize = 32;
pub const EMPLOYEE_NUM_MAX_LEN: usize = 5;
