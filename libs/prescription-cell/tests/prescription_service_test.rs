use assert_matches::assert_matches;
use uuid::Uuid;

use prescription_cell::models::{IssuePrescriptionRequest, PrescriptionError};
use prescription_cell::services::PrescriptionService;
use shared_database::{PatientRepository, PrescriptionRepository, Repositories};
use shared_models::{MedicineType, NewPatient, Patient, StaffMember, StaffRole};
use shared_utils::test_utils::seed_staff;

async fn setup() -> (Repositories, StaffMember, Patient) {
    let repositories = Repositories::in_memory();
    let doctor = seed_staff(&repositories, "David", "DC001", StaffRole::Doctor).await.unwrap();
    let patient = repositories.patients.insert_patient(NewPatient {
        name: "Alice".to_string(),
        address: "1 High Street".to_string(),
        phone: "0123456789".to_string(),
        doctor_id: Some(doctor.id),
    }).await.unwrap();
    (repositories, doctor, patient)
}

fn request(patient_name: &str) -> IssuePrescriptionRequest {
    IssuePrescriptionRequest {
        medicine_type: MedicineType::Ointment,
        patient_name: patient_name.to_string(),
        quantity: 3,
        dosage: 1.25,
    }
}

#[tokio::test]
async fn test_issue_prescription_records_doctor_and_patient() {
    let (repositories, doctor, patient) = setup().await;
    let service = PrescriptionService::new(&repositories);

    let prescription = service.issue_prescription(&doctor, request("Alice")).await.unwrap();

    assert_eq!(prescription.doctor_id, doctor.id);
    assert_eq!(prescription.patient_id, patient.id);
    assert_eq!(prescription.medicine_type, MedicineType::Ointment);
    assert_eq!(prescription.dosage, 1.3);
    assert_eq!(service.list_prescriptions().await.unwrap(), vec![prescription]);
}

#[tokio::test]
async fn test_unregistered_patient_is_rejected() {
    let (repositories, doctor, _) = setup().await;
    let service = PrescriptionService::new(&repositories);

    let result = service.issue_prescription(&doctor, request("Bob")).await;

    assert_matches!(result, Err(PrescriptionError::PatientNotRegistered(name)) if name == "Bob");
    assert!(repositories.prescriptions.list_prescriptions().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_out_of_range_quantity_is_rejected() {
    let (repositories, doctor, _) = setup().await;
    let service = PrescriptionService::new(&repositories);
    let mut req = request("Alice");
    req.quantity = 31;

    assert_matches!(
        service.issue_prescription(&doctor, req).await,
        Err(PrescriptionError::ValidationError(msg)) if msg == "Quantity must be between 1 and 30"
    );
}

#[tokio::test]
async fn test_cancel_prescription() {
    let (repositories, doctor, _) = setup().await;
    let service = PrescriptionService::new(&repositories);
    let prescription = service.issue_prescription(&doctor, request("Alice")).await.unwrap();

    service.cancel_prescription(prescription.id).await.unwrap();

    assert!(service.list_prescriptions().await.unwrap().is_empty());
    assert_matches!(
        service.cancel_prescription(prescription.id).await,
        Err(PrescriptionError::NotFound(_))
    );
}

#[tokio::test]
async fn test_cancel_unknown_prescription() {
    let (repositories, _, _) = setup().await;
    let service = PrescriptionService::new(&repositories);
    let missing = Uuid::new_v4();

    assert_matches!(
        service.cancel_prescription(missing).await,
        Err(PrescriptionError::NotFound(id)) if id == missing
    );
}
