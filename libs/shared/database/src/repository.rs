use async_trait::async_trait;
use chrono::NaiveDateTime;
use uuid::Uuid;

use shared_models::auth::{NewUserAccount, UserAccount};
use shared_models::{
    Appointment, NewAppointment, NewPatient, NewPrescription, NewStaffMember, Patient,
    Prescription, StaffMember,
};

use crate::error::DatabaseError;

pub type DbResult<T> = Result<T, DatabaseError>;

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// All appointments, oldest booking first.
    async fn list_all_appointments(&self) -> DbResult<Vec<Appointment>>;

    /// Exact match on the slot timestamp.
    async fn find_appointment_by_slot(&self, scheduled_at: NaiveDateTime) -> DbResult<Option<Appointment>>;

    async fn find_appointment_by_id(&self, id: Uuid) -> DbResult<Option<Appointment>>;

    /// Stores the appointment and assigns its id. Fails with `Conflict` if the
    /// slot timestamp is already taken.
    async fn insert_appointment(&self, appointment: NewAppointment) -> DbResult<Appointment>;

    async fn delete_appointment(&self, appointment: &Appointment) -> DbResult<()>;
}

#[async_trait]
pub trait PatientRepository: Send + Sync {
    async fn list_patients(&self) -> DbResult<Vec<Patient>>;

    async fn find_patient_by_name(&self, name: &str) -> DbResult<Option<Patient>>;

    async fn find_patient_by_id(&self, id: Uuid) -> DbResult<Option<Patient>>;

    async fn count_patients_for_doctor(&self, doctor_id: Uuid) -> DbResult<usize>;

    async fn insert_patient(&self, patient: NewPatient) -> DbResult<Patient>;

    async fn delete_patient(&self, patient: &Patient) -> DbResult<()>;
}

#[async_trait]
pub trait StaffRepository: Send + Sync {
    async fn list_staff(&self) -> DbResult<Vec<StaffMember>>;

    async fn find_staff_by_name(&self, name: &str) -> DbResult<Option<StaffMember>>;

    async fn find_staff_by_employee_num(&self, employee_num: &str) -> DbResult<Option<StaffMember>>;

    async fn find_staff_by_id(&self, id: Uuid) -> DbResult<Option<StaffMember>>;

    async fn insert_staff(&self, staff: NewStaffMember) -> DbResult<StaffMember>;

    async fn delete_staff(&self, staff: &StaffMember) -> DbResult<()>;
}

#[async_trait]
pub trait PrescriptionRepository: Send + Sync {
    async fn list_prescriptions(&self) -> DbResult<Vec<Prescription>>;

    async fn find_prescription_by_id(&self, id: Uuid) -> DbResult<Option<Prescription>>;

    async fn insert_prescription(&self, prescription: NewPrescription) -> DbResult<Prescription>;

    async fn delete_prescription(&self, prescription: &Prescription) -> DbResult<()>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_user_by_username(&self, username: &str) -> DbResult<Option<UserAccount>>;

    async fn insert_user(&self, user: NewUserAccount) -> DbResult<UserAccount>;
}
