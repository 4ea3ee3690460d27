use tracing::{debug, warn};

use shared_database::StaffRepository;
use shared_models::auth::User;
use shared_models::StaffMember;

use crate::models::StaffError;

/// Resolves the caller's staff record and rejects anyone who is not a doctor.
/// `action` completes the sentence "Only doctors can ...".
pub async fn require_doctor(
    staff: &dyn StaffRepository,
    user: &User,
    action: &'static str,
) -> Result<StaffMember, StaffError> {
    debug!("Checking doctor privileges for {}", user.employee_num);

    match staff.find_staff_by_employee_num(&user.employee_num).await? {
        Some(member) if member.is_doctor() => Ok(member),
        _ => {
            warn!("{} ({}) tried to {} without doctor privileges",
                  user.username, user.employee_num, action);
            Err(StaffError::DoctorOnly(action))
        }
    }
}
