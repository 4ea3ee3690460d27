use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Bookable session hours for every day, in booking order (24-hour clock).
pub const APPOINTMENT_HOURS: [u32; 4] = [9, 11, 14, 16];

pub fn appointment_hours() -> &'static [u32] {
    &APPOINTMENT_HOURS
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    #[error("{0}:00 is not an appointment hour (choose one of 9:00, 11:00, 14:00, 16:00)")]
    UnknownHour(u32),

    #[error("{0} does not start on a session hour")]
    NotOnTheHour(NaiveDateTime),
}

/// A bookable (date, hour) pair. The hour always comes from [`APPOINTMENT_HOURS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Slot {
    date: NaiveDate,
    hour: u32,
}

impl Slot {
    pub fn new(date: NaiveDate, hour: u32) -> Result<Self, SlotError> {
        if !APPOINTMENT_HOURS.contains(&hour) {
            return Err(SlotError::UnknownHour(hour));
        }
        Ok(Self { date, hour })
    }

    /// The first session of `date`.
    pub fn first_of_day(date: NaiveDate) -> Self {
        Self { date, hour: APPOINTMENT_HOURS[0] }
    }

    /// Every session of `date`, in catalog order.
    pub fn day_slots(date: NaiveDate) -> impl Iterator<Item = Slot> {
        APPOINTMENT_HOURS.iter().map(move |&hour| Slot { date, hour })
    }

    /// Decodes a stored appointment timestamp.
    pub fn from_datetime(at: NaiveDateTime) -> Result<Self, SlotError> {
        if at.minute() != 0 || at.second() != 0 || at.nanosecond() != 0 {
            return Err(SlotError::NotOnTheHour(at));
        }
        Self::new(at.date(), at.hour())
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    /// Encodes the slot as the single timestamp stored on an appointment.
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(NaiveTime::MIN) + chrono::Duration::hours(self.hour as i64)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:00", self.date.format("%Y-%m-%d"), self.hour)
    }
}
