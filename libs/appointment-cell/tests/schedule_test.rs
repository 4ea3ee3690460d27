// libs/appointment-cell/tests/schedule_test.rs
use std::sync::Arc;

use assert_matches::assert_matches;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use mockall::{mock, predicate::eq};
use uuid::Uuid;

use appointment_cell::models::AppointmentError;
use appointment_cell::services::AppointmentSchedule;
use appointment_cell::Slot;
use shared_database::{AppointmentRepository, DatabaseError, DbResult, InMemoryRepository};
use shared_models::{Appointment, AppointmentType, NewAppointment};

// ==============================================================================
// TEST FIXTURES
// ==============================================================================

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 3, 10).unwrap()
}

fn tomorrow() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 3, 11).unwrap()
}

fn day_after_tomorrow() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 3, 12).unwrap()
}

fn slot(date: NaiveDate, hour: u32) -> Slot {
    Slot::new(date, hour).unwrap()
}

fn new_appointment(at: Slot) -> NewAppointment {
    NewAppointment {
        appointment_type: AppointmentType::Consultation,
        staff_id: Uuid::new_v4(),
        patient_id: Uuid::new_v4(),
        scheduled_at: at.starts_at(),
        created_by: "reception".to_string(),
    }
}

async fn store_with(slots: &[Slot]) -> Arc<InMemoryRepository> {
    let repo = Arc::new(InMemoryRepository::new());
    for &s in slots {
        repo.insert_appointment(new_appointment(s)).await.unwrap();
    }
    repo
}

async fn load(repo: &Arc<InMemoryRepository>) -> AppointmentSchedule {
    AppointmentSchedule::load_as_of(repo.clone(), today()).await.unwrap()
}

// ==============================================================================
// NEXT AVAILABLE SLOT
// ==============================================================================

#[tokio::test]
async fn test_empty_store_returns_tomorrow_first_session() {
    let repo = store_with(&[]).await;
    let schedule = load(&repo).await;

    assert_eq!(schedule.find_next_available(), slot(tomorrow(), 9));
}

#[tokio::test]
async fn test_fully_booked_tomorrow_moves_to_next_day() {
    let repo = store_with(&[
        slot(tomorrow(), 9),
        slot(tomorrow(), 11),
        slot(tomorrow(), 14),
        slot(tomorrow(), 16),
    ]).await;
    let schedule = load(&repo).await;

    assert_eq!(schedule.find_next_available(), slot(day_after_tomorrow(), 9));
}

#[tokio::test]
async fn test_fully_booked_tomorrow_in_reverse_booking_order() {
    let repo = store_with(&[
        slot(tomorrow(), 16),
        slot(tomorrow(), 14),
        slot(tomorrow(), 11),
        slot(tomorrow(), 9),
    ]).await;
    let schedule = load(&repo).await;

    assert_eq!(schedule.find_next_available(), slot(day_after_tomorrow(), 9));
}

#[tokio::test]
async fn test_partial_day_returns_first_free_hour_same_day() {
    let repo = store_with(&[slot(tomorrow(), 9)]).await;
    let schedule = load(&repo).await;

    assert_eq!(schedule.find_next_available(), slot(tomorrow(), 11));
}

#[tokio::test]
async fn test_gap_behind_later_bookings_is_found() {
    // 14:00 tomorrow is free even though later sessions are taken.
    let repo = store_with(&[
        slot(day_after_tomorrow(), 9),
        slot(tomorrow(), 16),
        slot(tomorrow(), 9),
        slot(tomorrow(), 11),
    ]).await;
    let schedule = load(&repo).await;

    assert_eq!(schedule.find_next_available(), slot(tomorrow(), 14));
}

#[tokio::test]
async fn test_scan_continues_across_several_full_days() {
    let mut booked: Vec<Slot> = Slot::day_slots(tomorrow()).collect();
    booked.extend(Slot::day_slots(day_after_tomorrow()));
    booked.push(slot(NaiveDate::from_ymd_opt(2030, 3, 13).unwrap(), 9));
    let repo = store_with(&booked).await;
    let schedule = load(&repo).await;

    assert_eq!(
        schedule.find_next_available(),
        slot(NaiveDate::from_ymd_opt(2030, 3, 13).unwrap(), 11)
    );
}

#[tokio::test]
async fn test_past_bookings_do_not_affect_search() {
    let repo = store_with(&[
        slot(today(), 9),
        slot(NaiveDate::from_ymd_opt(2030, 3, 1).unwrap(), 9),
    ]).await;
    let schedule = load(&repo).await;

    assert_eq!(schedule.find_next_available(), slot(tomorrow(), 9));
}

#[tokio::test]
async fn test_next_available_is_never_before_tomorrow() {
    let scenarios: Vec<Vec<Slot>> = vec![
        vec![],
        vec![slot(today(), 16)],
        vec![slot(tomorrow(), 11)],
        Slot::day_slots(tomorrow()).collect(),
        vec![slot(NaiveDate::from_ymd_opt(2030, 4, 1).unwrap(), 9)],
    ];

    for booked in scenarios {
        let repo = store_with(&booked).await;
        let schedule = load(&repo).await;
        let next = schedule.find_next_available();

        assert!(next >= slot(tomorrow(), 9), "{} is before tomorrow", next);
        assert!(!booked.contains(&next), "{} is already booked", next);
    }
}

// ==============================================================================
// AVAILABILITY
// ==============================================================================

#[tokio::test]
async fn test_is_available_on_empty_store() {
    let repo = store_with(&[]).await;
    let schedule = load(&repo).await;

    assert!(schedule.is_available(slot(tomorrow(), 9)).await.unwrap());
}

#[tokio::test]
async fn test_is_available_false_for_planted_slot() {
    let repo = store_with(&[slot(tomorrow(), 14)]).await;
    let schedule = load(&repo).await;

    assert!(!schedule.is_available(slot(tomorrow(), 14)).await.unwrap());
    assert!(schedule.is_available(slot(tomorrow(), 16)).await.unwrap());
}

#[tokio::test]
async fn test_is_available_sees_bookings_made_by_other_sessions() {
    let repo = store_with(&[]).await;
    let schedule = load(&repo).await;

    // Booked elsewhere after this schedule was loaded.
    repo.insert_appointment(new_appointment(slot(tomorrow(), 11))).await.unwrap();

    assert!(schedule.list().is_empty());
    assert!(!schedule.is_available(slot(tomorrow(), 11)).await.unwrap());
}

mock! {
    pub AppointmentRepo {}

    #[async_trait]
    impl AppointmentRepository for AppointmentRepo {
        async fn list_all_appointments(&self) -> DbResult<Vec<Appointment>>;
        async fn find_appointment_by_slot(&self, scheduled_at: NaiveDateTime) -> DbResult<Option<Appointment>>;
        async fn find_appointment_by_id(&self, id: Uuid) -> DbResult<Option<Appointment>>;
        async fn insert_appointment(&self, appointment: NewAppointment) -> DbResult<Appointment>;
        async fn delete_appointment(&self, appointment: &Appointment) -> DbResult<()>;
    }
}

#[tokio::test]
async fn test_is_available_queries_repository_by_exact_timestamp() {
    let wanted = slot(tomorrow(), 9);

    let mut repo = MockAppointmentRepo::new();
    repo.expect_list_all_appointments()
        .times(1)
        .returning(|| Ok(Vec::new()));
    repo.expect_find_appointment_by_slot()
        .with(eq(wanted.starts_at()))
        .times(2)
        .returning(|_| Ok(None));

    let schedule = AppointmentSchedule::load_as_of(Arc::new(repo), today()).await.unwrap();

    assert!(schedule.is_available(wanted).await.unwrap());
    assert!(schedule.is_available(wanted).await.unwrap());
}

// ==============================================================================
// ADD / CANCEL
// ==============================================================================

#[tokio::test]
async fn test_add_persists_and_tracks() {
    let repo = store_with(&[]).await;
    let mut schedule = load(&repo).await;

    let stored = schedule.add(new_appointment(slot(tomorrow(), 9))).await.unwrap();

    assert!(schedule.is_tracked(stored.id));
    assert_eq!(schedule.list(), &[stored.clone()]);
    assert!(repo.find_appointment_by_id(stored.id).await.unwrap().is_some());
    assert_eq!(schedule.find_next_available(), slot(tomorrow(), 11));
}

#[tokio::test]
async fn test_cancel_removes_from_cache_and_store() {
    let repo = store_with(&[slot(tomorrow(), 9)]).await;
    let mut schedule = load(&repo).await;
    let appointment = schedule.list()[0].clone();

    schedule.cancel(&appointment).await.unwrap();

    assert!(schedule.list().is_empty());
    assert!(repo.find_appointment_by_id(appointment.id).await.unwrap().is_none());
    assert!(repo.list_all_appointments().await.unwrap().is_empty());
    assert!(schedule.is_available(slot(tomorrow(), 9)).await.unwrap());
}

#[tokio::test]
async fn test_cancel_untracked_appointment_is_reported() {
    let repo = store_with(&[]).await;
    let mut schedule = load(&repo).await;

    let elsewhere = repo.insert_appointment(new_appointment(slot(tomorrow(), 16))).await.unwrap();

    let result = schedule.cancel(&elsewhere).await;
    assert_matches!(result, Err(AppointmentError::NotTracked(id)) if id == elsewhere.id);

    // Nothing was deleted.
    assert!(repo.find_appointment_by_id(elsewhere.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_off_catalog_booking_does_not_block_a_slot() {
    let repo = store_with(&[]).await;
    let mut odd = new_appointment(slot(tomorrow(), 9));
    odd.scheduled_at = tomorrow().and_hms_opt(9, 30, 0).unwrap();
    repo.insert_appointment(odd).await.unwrap();

    let schedule = load(&repo).await;

    assert_eq!(schedule.list().len(), 1);
    assert_eq!(schedule.find_next_available(), slot(tomorrow(), 9));
}

#[tokio::test]
async fn test_excluding_a_slot_skips_it() {
    let repo = store_with(&[slot(tomorrow(), 11)]).await;
    let schedule = load(&repo).await;

    assert_eq!(schedule.find_next_available_excluding(slot(tomorrow(), 9)), slot(tomorrow(), 14));

    let empty = load(&store_with(&[]).await).await;
    assert_eq!(empty.find_next_available_excluding(slot(tomorrow(), 9)), slot(tomorrow(), 11));
}

fn stored(at: Slot) -> Appointment {
    Appointment {
        id: Uuid::new_v4(),
        appointment_type: AppointmentType::Consultation,
        staff_id: Uuid::new_v4(),
        patient_id: Uuid::new_v4(),
        scheduled_at: at.starts_at(),
        created_by: "reception".to_string(),
        created_at: Utc::now(),
    }
}

/// Lists `initial` once, then fails every later listing.
fn flaky_listing(repo: &mut MockAppointmentRepo, initial: Vec<Appointment>) {
    let mut calls = 0;
    repo.expect_list_all_appointments().returning(move || {
        calls += 1;
        if calls == 1 {
            Ok(initial.clone())
        } else {
            Err(DatabaseError::Api { status: 503, message: "unavailable".to_string() })
        }
    });
}

#[tokio::test]
async fn test_add_survives_failed_reload() {
    let committed = stored(slot(tomorrow(), 9));
    let returned = committed.clone();

    let mut repo = MockAppointmentRepo::new();
    flaky_listing(&mut repo, Vec::new());
    repo.expect_insert_appointment()
        .times(1)
        .returning(move |_| Ok(returned.clone()));

    let mut schedule = AppointmentSchedule::load_as_of(Arc::new(repo), today()).await.unwrap();
    let result = schedule.add(new_appointment(slot(tomorrow(), 9))).await;

    assert_eq!(result.unwrap().id, committed.id);
    assert!(schedule.is_tracked(committed.id));
    assert_eq!(schedule.find_next_available(), slot(tomorrow(), 11));
}

#[tokio::test]
async fn test_cancel_survives_failed_reload() {
    let booked = stored(slot(tomorrow(), 9));

    let mut repo = MockAppointmentRepo::new();
    flaky_listing(&mut repo, vec![booked.clone()]);
    repo.expect_delete_appointment()
        .times(1)
        .returning(|_| Ok(()));

    let mut schedule = AppointmentSchedule::load_as_of(Arc::new(repo), today()).await.unwrap();
    assert!(schedule.is_tracked(booked.id));

    schedule.cancel(&booked).await.unwrap();

    assert!(!schedule.is_tracked(booked.id));
    assert!(schedule.list().is_empty());
}
