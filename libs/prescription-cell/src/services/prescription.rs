use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use shared_database::{PatientRepository, PrescriptionRepository, Repositories};
use shared_models::{NewPrescription, Prescription, StaffMember};

use crate::models::{IssuePrescriptionRequest, PrescriptionError};

pub struct PrescriptionService {
    prescriptions: Arc<dyn PrescriptionRepository>,
    patients: Arc<dyn PatientRepository>,
}

impl PrescriptionService {
    pub fn new(repositories: &Repositories) -> Self {
        Self {
            prescriptions: Arc::clone(&repositories.prescriptions),
            patients: Arc::clone(&repositories.patients),
        }
    }

    pub async fn list_prescriptions(&self) -> Result<Vec<Prescription>, PrescriptionError> {
        let prescriptions = self.prescriptions.list_prescriptions().await?;
        debug!("Listed {} prescriptions", prescriptions.len());
        Ok(prescriptions)
    }

    /// Issues a prescription from `doctor` to a registered patient.
    pub async fn issue_prescription(
        &self,
        doctor: &StaffMember,
        request: IssuePrescriptionRequest,
    ) -> Result<Prescription, PrescriptionError> {
        let dosage = request.validate()?;

        let patient = self
            .patients
            .find_patient_by_name(&request.patient_name)
            .await?
            .ok_or_else(|| PrescriptionError::PatientNotRegistered(request.patient_name.clone()))?;

        let prescription = self.prescriptions.insert_prescription(NewPrescription {
            medicine_type: request.medicine_type,
            patient_id: patient.id,
            doctor_id: doctor.id,
            quantity: request.quantity,
            dosage,
        }).await?;

        info!("Dr. {} prescribed {} x{} to patient {}",
              doctor.name, prescription.medicine_type, prescription.quantity, patient.id);
        Ok(prescription)
    }

    pub async fn cancel_prescription(&self, prescription_id: Uuid) -> Result<Prescription, PrescriptionError> {
        let prescription = self
            .prescriptions
            .find_prescription_by_id(prescription_id)
            .await?
            .ok_or(PrescriptionError::NotFound(prescription_id))?;

        self.prescriptions.delete_prescription(&prescription).await?;

        info!("Prescription {} cancelled", prescription.id);
        Ok(prescription)
    }
}
