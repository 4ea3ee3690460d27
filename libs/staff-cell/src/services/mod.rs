pub mod authorization;
pub mod staff;

pub use staff::StaffService;
