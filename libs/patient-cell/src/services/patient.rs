use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use shared_database::{DatabaseError, PatientRepository, Repositories, StaffRepository};
use shared_models::{NewPatient, Patient};

use crate::models::{PatientError, RegisterPatientRequest, MAX_PATIENTS_PER_DOCTOR};

pub struct PatientService {
    patients: Arc<dyn PatientRepository>,
    staff: Arc<dyn StaffRepository>,
}

impl PatientService {
    pub fn new(repositories: &Repositories) -> Self {
        Self {
            patients: Arc::clone(&repositories.patients),
            staff: Arc::clone(&repositories.staff),
        }
    }

    pub async fn list_patients(&self) -> Result<Vec<Patient>, PatientError> {
        let patients = self.patients.list_patients().await?;
        debug!("Listed {} patients", patients.len());
        Ok(patients)
    }

    /// Registers a patient under a primary doctor.
    pub async fn register_patient(&self, request: RegisterPatientRequest) -> Result<Patient, PatientError> {
        request.validate()?;

        if self.patients.find_patient_by_name(&request.name).await?.is_some() {
            return Err(PatientError::AlreadyRegistered(request.name));
        }

        let doctor = match self.staff.find_staff_by_name(&request.doctor_name).await? {
            Some(member) if member.is_doctor() => member,
            _ => return Err(PatientError::DoctorNotFound(request.doctor_name)),
        };

        if self.patients.count_patients_for_doctor(doctor.id).await? >= MAX_PATIENTS_PER_DOCTOR {
            warn!("Dr. {} is at capacity", doctor.name);
            return Err(PatientError::DoctorAtCapacity(doctor.name));
        }

        let name = request.name.clone();
        let inserted = self.patients.insert_patient(NewPatient {
            name: request.name,
            address: request.address,
            phone: request.phone,
            doctor_id: Some(doctor.id),
        }).await;

        let patient = match inserted {
            Err(DatabaseError::Conflict(_)) => return Err(PatientError::AlreadyRegistered(name)),
            result => result?,
        };

        info!("Registered patient {} under Dr. {}", patient.id, doctor.name);
        Ok(patient)
    }

    pub async fn delete_patient(&self, patient_id: Uuid) -> Result<Patient, PatientError> {
        let patient = self
            .patients
            .find_patient_by_id(patient_id)
            .await?
            .ok_or(PatientError::NotFound(patient_id))?;

        self.patients.delete_patient(&patient).await?;

        info!("Deleted patient {}", patient.id);
        Ok(patient)
    }
}
