use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prescription {
    pub id: Uuid,
    pub medicine_type: MedicineType,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub quantity: i32,
    pub dosage: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MedicineType {
    #[serde(alias = "tablet")]
    Tablet,
    #[serde(alias = "powder")]
    Powder,
    #[serde(alias = "ointment")]
    Ointment,
}

impl fmt::Display for MedicineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MedicineType::Tablet => write!(f, "Tablet"),
            MedicineType::Powder => write!(f, "Powder"),
            MedicineType::Ointment => write!(f, "Ointment"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPrescription {
    pub medicine_type: MedicineType,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub quantity: i32,
    pub dosage: f64,
}
