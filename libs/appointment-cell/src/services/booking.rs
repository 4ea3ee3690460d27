// libs/appointment-cell/src/services/booking.rs
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use shared_database::{AppointmentRepository, DatabaseError, PatientRepository, Repositories, StaffRepository};
use shared_models::{Appointment, AppointmentType, NewAppointment, NewPatient, Patient, StaffMember};

use crate::models::{
    AppointmentError, BookAppointmentRequest, BookingAgent, BookingOutcome, UnavailableReason,
};
use crate::services::schedule::AppointmentSchedule;
use crate::slot::Slot;

/// Reception desk operations for one signed-in staff member.
pub struct AppointmentBookingService {
    agent: BookingAgent,
    schedule: AppointmentSchedule,
    appointments: Arc<dyn AppointmentRepository>,
    patients: Arc<dyn PatientRepository>,
    staff: Arc<dyn StaffRepository>,
}

impl AppointmentBookingService {
    /// Loads a fresh schedule from the repositories.
    pub async fn new(agent: BookingAgent, repositories: &Repositories) -> Result<Self, AppointmentError> {
        let schedule = AppointmentSchedule::load(Arc::clone(&repositories.appointments)).await?;
        Ok(Self::with_schedule(agent, schedule, repositories))
    }

    pub fn with_schedule(
        agent: BookingAgent,
        schedule: AppointmentSchedule,
        repositories: &Repositories,
    ) -> Self {
        Self {
            agent,
            schedule,
            appointments: Arc::clone(&repositories.appointments),
            patients: Arc::clone(&repositories.patients),
            staff: Arc::clone(&repositories.staff),
        }
    }

    pub fn agent(&self) -> &BookingAgent {
        &self.agent
    }

    pub fn schedule(&self) -> &AppointmentSchedule {
        &self.schedule
    }

    pub async fn find_staff(&self, name: &str) -> Result<Option<StaffMember>, AppointmentError> {
        debug!("Looking up staff member: {}", name);
        Ok(self.staff.find_staff_by_name(name).await?)
    }

    pub async fn find_patient(&self, name: &str) -> Result<Option<Patient>, AppointmentError> {
        debug!("Looking up patient: {}", name);
        Ok(self.patients.find_patient_by_name(name).await?)
    }

    /// Registers a walk-in patient without a primary doctor.
    pub async fn add_patient(
        &self,
        name: &str,
        address: &str,
        phone: &str,
    ) -> Result<Patient, AppointmentError> {
        let patient = self.patients.insert_patient(NewPatient {
            name: name.to_string(),
            address: address.to_string(),
            phone: phone.to_string(),
            doctor_id: None,
        }).await?;

        info!("Registered patient {} at reception", patient.id);
        Ok(patient)
    }

    /// Books `slot` without checking it first; see [`Self::book_appointment`]
    /// for the checked flow.
    pub async fn make_appointment(
        &mut self,
        appointment_type: AppointmentType,
        staff: &StaffMember,
        patient: &Patient,
        slot: Slot,
    ) -> Result<Appointment, AppointmentError> {
        let appointment = NewAppointment {
            appointment_type,
            staff_id: staff.id,
            patient_id: patient.id,
            scheduled_at: slot.starts_at(),
            created_by: self.agent.name.clone(),
        };

        let result = self.schedule.add(appointment).await;
        match result {
            Err(AppointmentError::Repository(DatabaseError::Conflict(_))) => {
                warn!("Slot {} was booked concurrently", slot);
                Err(self.unavailable(slot, UnavailableReason::AlreadyBooked).await)
            }
            result => result,
        }
    }

    pub async fn cancel_appointment(&mut self, appointment_id: Uuid) -> Result<Appointment, AppointmentError> {
        let appointment = self
            .appointments
            .find_appointment_by_id(appointment_id)
            .await?
            .ok_or(AppointmentError::AppointmentNotFound(appointment_id))?;

        self.schedule.cancel(&appointment).await?;
        Ok(appointment)
    }

    pub fn find_next_available(&self) -> Slot {
        self.schedule.find_next_available()
    }

    pub async fn check_available_date(&self, slot: Slot) -> Result<bool, AppointmentError> {
        self.schedule.is_available(slot).await
    }

    /// Full reception flow: the slot must be from tomorrow on and free, the
    /// doctor must exist, and an unknown patient is registered on the spot.
    pub async fn book_appointment(
        &mut self,
        request: BookAppointmentRequest,
    ) -> Result<BookingOutcome, AppointmentError> {
        let slot = request.validate()?;
        debug!("Booking {} for {} with {} at {}",
               request.appointment_type, request.patient_name, request.staff_name, slot);

        if slot.date() < self.schedule.tomorrow() {
            warn!("Rejected booking at {}: before cutoff", slot);
            return Err(self.unavailable(slot, UnavailableReason::BeforeCutoff).await);
        }

        if !self.check_available_date(slot).await? {
            warn!("Rejected booking at {}: already booked", slot);
            return Err(self.unavailable(slot, UnavailableReason::AlreadyBooked).await);
        }

        let staff = self
            .find_staff(&request.staff_name)
            .await?
            .ok_or_else(|| AppointmentError::StaffNotFound(request.staff_name.clone()))?;

        let (patient, patient_registered) = match self.find_patient(&request.patient_name).await? {
            Some(patient) => (patient, false),
            None => {
                let patient = self
                    .add_patient(&request.patient_name, &request.patient_address, &request.patient_phone)
                    .await?;
                (patient, true)
            }
        };

        let appointment = self
            .make_appointment(request.appointment_type, &staff, &patient, slot)
            .await?;

        info!("Appointment {} booked by {} for {}", appointment.id, self.agent.name, slot);
        Ok(BookingOutcome {
            appointment,
            patient,
            patient_registered,
        })
    }

    /// Builds the rejection with a suggestion taken from a freshly reloaded
    /// schedule, so bookings made by other sessions are not suggested.
    async fn unavailable(&mut self, slot: Slot, reason: UnavailableReason) -> AppointmentError {
        if let Err(e) = self.schedule.reload().await {
            warn!("Could not reload schedule for a suggestion: {}", e);
        }

        let mut next = self.schedule.find_next_available();
        if next == slot {
            // Reload failed and the snapshot still has the slot as free.
            next = self.schedule.find_next_available_excluding(slot);
        }

        AppointmentError::SlotUnavailable {
            slot,
            reason,
            next_available: Some(next),
        }
    }
}
