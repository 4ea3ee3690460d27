pub mod booking;
pub mod schedule;

pub use booking::AppointmentBookingService;
pub use schedule::AppointmentSchedule;
