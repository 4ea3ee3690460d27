use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use reqwest::{header::{HeaderMap, HeaderValue}, Method};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
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
use crate::supabase::SupabaseClient;

const APPOINTMENTS: &str = "/rest/v1/appointments";
const PATIENTS: &str = "/rest/v1/patients";
const STAFF: &str = "/rest/v1/healthcare_professionals";
const PRESCRIPTIONS: &str = "/rest/v1/prescriptions";
const USERS: &str = "/rest/v1/users";

const SLOT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// PostgREST-backed repository. Unique indexes on the tables back the
/// constraints the core relies on (one appointment per `scheduled_at`).
pub struct SupabaseRepository {
    supabase: SupabaseClient,
}

impl SupabaseRepository {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    async fn fetch_rows<T: DeserializeOwned>(&self, path: &str) -> DbResult<Vec<T>> {
        self.supabase.request(Method::GET, path, None, None).await
    }

    async fn fetch_one<T: DeserializeOwned>(&self, path: &str) -> DbResult<Option<T>> {
        let rows: Vec<T> = self.fetch_rows(path).await?;
        Ok(rows.into_iter().next())
    }

    async fn insert_row<T: DeserializeOwned>(&self, table: &str, body: Value) -> DbResult<T> {
        let mut headers = HeaderMap::new();
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));

        let rows: Vec<T> = self.supabase.request_with_headers(
            Method::POST,
            table,
            None,
            Some(body),
            Some(headers),
        ).await?;

        rows.into_iter().next().ok_or_else(|| DatabaseError::Api {
            status: 201,
            message: format!("Insert into {} returned no rows", table),
        })
    }

    async fn delete_row(&self, table: &str, id: Uuid) -> DbResult<()> {
        let path = format!("{}?id=eq.{}", table, id);
        self.supabase.execute(Method::DELETE, &path, None).await
    }
}

#[async_trait]
impl AppointmentRepository for SupabaseRepository {
    async fn list_all_appointments(&self) -> DbResult<Vec<Appointment>> {
        self.fetch_rows(&format!("{}?order=created_at.asc", APPOINTMENTS)).await
    }

    async fn find_appointment_by_slot(&self, scheduled_at: NaiveDateTime) -> DbResult<Option<Appointment>> {
        debug!("Looking up appointment at {}", scheduled_at);
        let path = format!("{}?scheduled_at=eq.{}", APPOINTMENTS, scheduled_at.format(SLOT_FORMAT));
        self.fetch_one(&path).await
    }

    async fn find_appointment_by_id(&self, id: Uuid) -> DbResult<Option<Appointment>> {
        self.fetch_one(&format!("{}?id=eq.{}", APPOINTMENTS, id)).await
    }

    async fn insert_appointment(&self, appointment: NewAppointment) -> DbResult<Appointment> {
        let body = json!({
            "appointment_type": appointment.appointment_type,
            "staff_id": appointment.staff_id,
            "patient_id": appointment.patient_id,
            "scheduled_at": appointment.scheduled_at.format(SLOT_FORMAT).to_string(),
            "created_by": appointment.created_by,
            "created_at": Utc::now().to_rfc3339(),
        });
        self.insert_row(APPOINTMENTS, body).await
    }

    async fn delete_appointment(&self, appointment: &Appointment) -> DbResult<()> {
        self.delete_row(APPOINTMENTS, appointment.id).await
    }
}

#[async_trait]
impl PatientRepository for SupabaseRepository {
    async fn list_patients(&self) -> DbResult<Vec<Patient>> {
        self.fetch_rows(&format!("{}?order=created_at.asc", PATIENTS)).await
    }

    async fn find_patient_by_name(&self, name: &str) -> DbResult<Option<Patient>> {
        self.fetch_one(&format!("{}?name=eq.{}", PATIENTS, urlencoding::encode(name))).await
    }

    async fn find_patient_by_id(&self, id: Uuid) -> DbResult<Option<Patient>> {
        self.fetch_one(&format!("{}?id=eq.{}", PATIENTS, id)).await
    }

    async fn count_patients_for_doctor(&self, doctor_id: Uuid) -> DbResult<usize> {
        let rows: Vec<Value> = self
            .fetch_rows(&format!("{}?doctor_id=eq.{}&select=id", PATIENTS, doctor_id))
            .await?;
        Ok(rows.len())
    }

    async fn insert_patient(&self, patient: NewPatient) -> DbResult<Patient> {
        let body = json!({
            "name": patient.name,
            "address": patient.address,
            "phone": patient.phone,
            "doctor_id": patient.doctor_id,
            "created_at": Utc::now().to_rfc3339(),
        });
        self.insert_row(PATIENTS, body).await
    }

    async fn delete_patient(&self, patient: &Patient) -> DbResult<()> {
        self.delete_row(PATIENTS, patient.id).await
    }
}

#[async_trait]
impl StaffRepository for SupabaseRepository {
    async fn list_staff(&self) -> DbResult<Vec<StaffMember>> {
        self.fetch_rows(&format!("{}?order=created_at.asc", STAFF)).await
    }

    async fn find_staff_by_name(&self, name: &str) -> DbResult<Option<StaffMember>> {
        self.fetch_one(&format!("{}?name=eq.{}", STAFF, urlencoding::encode(name))).await
    }

    async fn find_staff_by_employee_num(&self, employee_num: &str) -> DbResult<Option<StaffMember>> {
        self.fetch_one(&format!("{}?employee_num=eq.{}", STAFF, urlencoding::encode(employee_num))).await
    }

    async fn find_staff_by_id(&self, id: Uuid) -> DbResult<Option<StaffMember>> {
        self.fetch_one(&format!("{}?id=eq.{}", STAFF, id)).await
    }

    async fn insert_staff(&self, staff: NewStaffMember) -> DbResult<StaffMember> {
        let body = json!({
            "name": staff.name,
            "employee_num": staff.employee_num,
            "employee_type": staff.role,
            "created_at": Utc::now().to_rfc3339(),
        });
        self.insert_row(STAFF, body).await
    }

    async fn delete_staff(&self, staff: &StaffMember) -> DbResult<()> {
        self.delete_row(STAFF, staff.id).await
    }
}

#[async_trait]
impl PrescriptionRepository for SupabaseRepository {
    async fn list_prescriptions(&self) -> DbResult<Vec<Prescription>> {
        self.fetch_rows(&format!("{}?order=created_at.asc", PRESCRIPTIONS)).await
    }

    async fn find_prescription_by_id(&self, id: Uuid) -> DbResult<Option<Prescription>> {
        self.fetch_one(&format!("{}?id=eq.{}", PRESCRIPTIONS, id)).await
    }

    async fn insert_prescription(&self, prescription: NewPrescription) -> DbResult<Prescription> {
        let body = json!({
            "medicine_type": prescription.medicine_type,
            "patient_id": prescription.patient_id,
            "doctor_id": prescription.doctor_id,
            "quantity": prescription.quantity,
            "dosage": prescription.dosage,
            "created_at": Utc::now().to_rfc3339(),
        });
        self.insert_row(PRESCRIPTIONS, body).await
    }

    async fn delete_prescription(&self, prescription: &Prescription) -> DbResult<()> {
        self.delete_row(PRESCRIPTIONS, prescription.id).await
    }
}

#[async_trait]
impl UserRepository for SupabaseRepository {
    async fn find_user_by_username(&self, username: &str) -> DbResult<Option<UserAccount>> {
        self.fetch_one(&format!("{}?username=eq.{}", USERS, urlencoding::encode(username))).await
    }

    async fn insert_user(&self, user: NewUserAccount) -> DbResult<UserAccount> {
        let body = json!({
            "username": user.username,
            "employee_num": user.employee_num,
            "password_hash": user.password_hash,
            "created_at": Utc::now().to_rfc3339(),
        });
        self.insert_row(USERS, body).await
    }
}
