pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod slot;

pub use models::*;
pub use slot::{appointment_hours, Slot, SlotError};
