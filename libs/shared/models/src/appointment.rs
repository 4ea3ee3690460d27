use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub appointment_type: AppointmentType,
    pub staff_id: Uuid,
    pub patient_id: Uuid,
    /// Booked slot: the calendar date at the slot hour, no minutes and no zone.
    pub scheduled_at: NaiveDateTime,
    /// Name of the staff member who made the booking.
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl PartialEq for Appointment {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Appointment {}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AppointmentType {
    #[serde(alias = "consultation")]
    Consultation,

    #[serde(alias = "prescription")]
    Prescription,

    #[serde(alias = "surgery")]
    Surgery,
}

impl fmt::Display for AppointmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentType::Consultation => write!(f, "Consultation"),
            AppointmentType::Prescription => write!(f, "Prescription"),
            AppointmentType::Surgery => write!(f, "Surgery"),
        }
    }
}

/// Appointment data before the repository assigns an id and creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAppointment {
    pub appointment_type: AppointmentType,
    pub staff_id: Uuid,
    pub patient_id: Uuid,
    pub scheduled_at: NaiveDateTime,
    pub created_by: String,
}
