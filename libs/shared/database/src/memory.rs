use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use shared_models::auth::{NewUserAccount, UserAccount};
use shared_models::{
    Appointment, NewAppointment, NewPatient, NewPrescription, NewStaffMember, Patient,
    Prescription, StaffMember,
};

use crate::error::DatabaseError;
use crate::repository::{
    AppointmentRepository, DbResult, PatientRepository, PrescriptionRepository,
    StaffRepository, UserRepository,
};

#[derive(Default)]
struct Tables {
    appointments: Vec<Appointment>,
    patients: Vec<Patient>,
    staff: Vec<StaffMember>,
    prescriptions: Vec<Prescription>,
    users: Vec<UserAccount>,
}

/// Process-local store with the same unique constraints as the database schema.
/// Rows keep insertion order.
#[derive(Default)]
pub struct InMemoryRepository {
    tables: RwLock<Tables>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AppointmentRepository for InMemoryRepository {
    async fn list_all_appointments(&self) -> DbResult<Vec<Appointment>> {
        Ok(self.tables.read().await.appointments.clone())
    }

    async fn find_appointment_by_slot(&self, scheduled_at: NaiveDateTime) -> DbResult<Option<Appointment>> {
        let tables = self.tables.read().await;
        Ok(tables.appointments.iter().find(|a| a.scheduled_at == scheduled_at).cloned())
    }

    async fn find_appointment_by_id(&self, id: Uuid) -> DbResult<Option<Appointment>> {
        let tables = self.tables.read().await;
        Ok(tables.appointments.iter().find(|a| a.id == id).cloned())
    }

    async fn insert_appointment(&self, appointment: NewAppointment) -> DbResult<Appointment> {
        let mut tables = self.tables.write().await;

        if tables.appointments.iter().any(|a| a.scheduled_at == appointment.scheduled_at) {
            return Err(DatabaseError::Conflict(format!(
                "appointment already booked at {}", appointment.scheduled_at
            )));
        }

        let stored = Appointment {
            id: Uuid::new_v4(),
            appointment_type: appointment.appointment_type,
            staff_id: appointment.staff_id,
            patient_id: appointment.patient_id,
            scheduled_at: appointment.scheduled_at,
            created_by: appointment.created_by,
            created_at: Utc::now(),
        };
        debug!("Stored appointment {} at {}", stored.id, stored.scheduled_at);
        tables.appointments.push(stored.clone());

        Ok(stored)
    }

    async fn delete_appointment(&self, appointment: &Appointment) -> DbResult<()> {
        self.tables.write().await.appointments.retain(|a| a.id != appointment.id);
        Ok(())
    }
}

#[async_trait]
impl PatientRepository for InMemoryRepository {
    async fn list_patients(&self) -> DbResult<Vec<Patient>> {
        Ok(self.tables.read().await.patients.clone())
    }

    async fn find_patient_by_name(&self, name: &str) -> DbResult<Option<Patient>> {
        let tables = self.tables.read().await;
        Ok(tables.patients.iter().find(|p| p.name == name).cloned())
    }

    async fn find_patient_by_id(&self, id: Uuid) -> DbResult<Option<Patient>> {
        let tables = self.tables.read().await;
        Ok(tables.patients.iter().find(|p| p.id == id).cloned())
    }

    async fn count_patients_for_doctor(&self, doctor_id: Uuid) -> DbResult<usize> {
        let tables = self.tables.read().await;
        Ok(tables.patients.iter().filter(|p| p.doctor_id == Some(doctor_id)).count())
    }

    async fn insert_patient(&self, patient: NewPatient) -> DbResult<Patient> {
        let mut tables = self.tables.write().await;

        if tables.patients.iter().any(|p| p.name == patient.name) {
            return Err(DatabaseError::Conflict(format!("patient name {} already exists", patient.name)));
        }

        let stored = Patient {
            id: Uuid::new_v4(),
            name: patient.name,
            address: patient.address,
            phone: patient.phone,
            doctor_id: patient.doctor_id,
            created_at: Utc::now(),
        };
        tables.patients.push(stored.clone());

        Ok(stored)
    }

    async fn delete_patient(&self, patient: &Patient) -> DbResult<()> {
        self.tables.write().await.patients.retain(|p| p.id != patient.id);
        Ok(())
    }
}

#[async_trait]
impl StaffRepository for InMemoryRepository {
    async fn list_staff(&self) -> DbResult<Vec<StaffMember>> {
        Ok(self.tables.read().await.staff.clone())
    }

    async fn find_staff_by_name(&self, name: &str) -> DbResult<Option<StaffMember>> {
        let tables = self.tables.read().await;
        Ok(tables.staff.iter().find(|s| s.name == name).cloned())
    }

    async fn find_staff_by_employee_num(&self, employee_num: &str) -> DbResult<Option<StaffMember>> {
        let tables = self.tables.read().await;
        Ok(tables.staff.iter().find(|s| s.employee_num == employee_num).cloned())
    }

    async fn find_staff_by_id(&self, id: Uuid) -> DbResult<Option<StaffMember>> {
        let tables = self.tables.read().await;
        Ok(tables.staff.iter().find(|s| s.id == id).cloned())
    }

    async fn insert_staff(&self, staff: NewStaffMember) -> DbResult<StaffMember> {
        let mut tables = self.tables.write().await;

        if tables.staff.iter().any(|s| s.name == staff.name) {
            return Err(DatabaseError::Conflict(format!("staff name {} already exists", staff.name)));
        }
        if tables.staff.iter().any(|s| s.employee_num == staff.employee_num) {
            return Err(DatabaseError::Conflict(format!(
                "employee number {} already exists", staff.employee_num
            )));
        }

        let stored = StaffMember {
            id: Uuid::new_v4(),
            name: staff.name,
            employee_num: staff.employee_num,
            role: staff.role,
            created_at: Utc::now(),
        };
        tables.staff.push(stored.clone());

        Ok(stored)
    }

    async fn delete_staff(&self, staff: &StaffMember) -> DbResult<()> {
        self.tables.write().await.staff.retain(|s| s.id != staff.id);
        Ok(())
    }
}

#[async_trait]
impl PrescriptionRepository for InMemoryRepository {
    async fn list_prescriptions(&self) -> DbResult<Vec<Prescription>> {
        Ok(self.tables.read().await.prescriptions.clone())
    }

    async fn find_prescription_by_id(&self, id: Uuid) -> DbResult<Option<Prescription>> {
        let tables = self.tables.read().await;
        Ok(tables.prescriptions.iter().find(|p| p.id == id).cloned())
    }

    async fn insert_prescription(&self, prescription: NewPrescription) -> DbResult<Prescription> {
        let stored = Prescription {
            id: Uuid::new_v4(),
            medicine_type: prescription.medicine_type,
            patient_id: prescription.patient_id,
            doctor_id: prescription.doctor_id,
            quantity: prescription.quantity,
            dosage: prescription.dosage,
            created_at: Utc::now(),
        };
        self.tables.write().await.prescriptions.push(stored.clone());

        Ok(stored)
    }

    async fn delete_prescription(&self, prescription: &Prescription) -> DbResult<()> {
        self.tables.write().await.prescriptions.retain(|p| p.id != prescription.id);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn find_user_by_username(&self, username: &str) -> DbResult<Option<UserAccount>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn insert_user(&self, user: NewUserAccount) -> DbResult<UserAccount> {
        let mut tables = self.tables.write().await;

        if tables.users.iter().any(|u| u.username == user.username) {
            return Err(DatabaseError::Conflict(format!("username {} already exists", user.username)));
        }

        let stored = UserAccount {
            id: Uuid::new_v4(),
            username: user.username,
            employee_num: user.employee_num,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        tables.users.push(stored.clone());

        Ok(stored)
    }
}
