pub mod auth;
pub mod error;
pub mod appointment;
pub mod patient;
pub mod staff;
pub mod prescription;

pub use appointment::{Appointment, AppointmentType, NewAppointment};
pub use patient::{NewPatient, Patient};
pub use staff::{NewStaffMember, StaffMember, StaffRole};
pub use prescription::{MedicineType, NewPrescription, Prescription};
