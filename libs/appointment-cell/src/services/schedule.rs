// libs/appointment-cell/src/services/schedule.rs
use chrono::{Days, Local, NaiveDate};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use shared_database::AppointmentRepository;
use shared_models::{Appointment, NewAppointment};

use crate::models::AppointmentError;
use crate::slot::Slot;

/// Snapshot of every booked appointment, loaded when the schedule is built.
///
/// A schedule lives for one request. Mutations made through it go to the
/// repository first, then patch the snapshot and reload it, so the snapshot
/// never holds a cancelled appointment or misses an added one even when the
/// reload fails. Availability checks always ask the repository, since other
/// sessions may have booked in the meantime.
pub struct AppointmentSchedule {
    repository: Arc<dyn AppointmentRepository>,
    appointments: Vec<Appointment>,
    today: NaiveDate,
}

impl AppointmentSchedule {
    pub async fn load(repository: Arc<dyn AppointmentRepository>) -> Result<Self, AppointmentError> {
        Self::load_as_of(repository, Local::now().date_naive()).await
    }

    /// Builds the schedule with an explicit reference date.
    pub async fn load_as_of(
        repository: Arc<dyn AppointmentRepository>,
        today: NaiveDate,
    ) -> Result<Self, AppointmentError> {
        let appointments = repository.list_all_appointments().await?;
        debug!("Loaded schedule with {} appointments as of {}", appointments.len(), today);

        Ok(Self {
            repository,
            appointments,
            today,
        })
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// First day that accepts bookings.
    pub fn tomorrow(&self) -> NaiveDate {
        self.today + Days::new(1)
    }

    pub fn list(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn is_tracked(&self, appointment_id: Uuid) -> bool {
        self.appointments.iter().any(|a| a.id == appointment_id)
    }

    /// Persists the appointment and refreshes the snapshot. Slot conflicts are
    /// the caller's concern; the repository rejects an exact duplicate.
    pub async fn add(&mut self, appointment: NewAppointment) -> Result<Appointment, AppointmentError> {
        let stored = self.repository.insert_appointment(appointment).await?;
        self.appointments.push(stored.clone());
        self.reload_after_write().await;

        info!("Appointment {} added at {}", stored.id, stored.scheduled_at);
        Ok(stored)
    }

    /// Deletes a tracked appointment and refreshes the snapshot.
    pub async fn cancel(&mut self, appointment: &Appointment) -> Result<(), AppointmentError> {
        if !self.is_tracked(appointment.id) {
            return Err(AppointmentError::NotTracked(appointment.id));
        }

        self.repository.delete_appointment(appointment).await?;
        self.appointments.retain(|a| a.id != appointment.id);
        self.reload_after_write().await;

        info!("Appointment {} cancelled", appointment.id);
        Ok(())
    }

    pub async fn is_available(&self, slot: Slot) -> Result<bool, AppointmentError> {
        let existing = self.repository.find_appointment_by_slot(slot.starts_at()).await?;
        Ok(existing.is_none())
    }

    /// Earliest free slot from tomorrow's first session onwards.
    ///
    /// An hour counts as free only when it matches none of the booked
    /// timestamps, so the answer does not depend on the order bookings were
    /// made in.
    pub fn find_next_available(&self) -> Slot {
        self.next_free(None)
    }

    /// Same search, additionally treating `taken` as booked.
    pub fn find_next_available_excluding(&self, taken: Slot) -> Slot {
        self.next_free(Some(taken))
    }

    fn next_free(&self, taken: Option<Slot>) -> Slot {
        let first = Slot::first_of_day(self.tomorrow());
        if self.appointments.is_empty() && taken.is_none() {
            return first;
        }

        // Timestamps off the catalog can never collide with a session.
        let booked: BTreeSet<Slot> = self
            .appointments
            .iter()
            .filter_map(|a| Slot::from_datetime(a.scheduled_at).ok())
            .chain(taken)
            .filter(|slot| *slot >= first)
            .collect();

        // Every fully booked day holds four of the finitely many booked
        // timestamps, so a free session is always reached.
        let mut day = first.date();
        loop {
            if let Some(free) = Slot::day_slots(day).find(|slot| !booked.contains(slot)) {
                return free;
            }
            day = day + Days::new(1);
        }
    }

    /// Replaces the snapshot with the repository's current contents.
    pub(crate) async fn reload(&mut self) -> Result<(), AppointmentError> {
        self.appointments = self.repository.list_all_appointments().await?;
        Ok(())
    }

    // The write is already committed; a failed reload keeps the locally
    // patched snapshot.
    async fn reload_after_write(&mut self) {
        if let Err(e) = self.reload().await {
            warn!("Schedule reload after write failed: {}", e);
        }
    }
}
