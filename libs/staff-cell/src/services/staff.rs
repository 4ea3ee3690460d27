use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use shared_database::{DatabaseError, Repositories, StaffRepository};
use shared_models::StaffMember;

use crate::models::{RegisterStaffRequest, StaffError};

pub struct StaffService {
    staff: Arc<dyn StaffRepository>,
}

impl StaffService {
    pub fn new(repositories: &Repositories) -> Self {
        Self {
            staff: Arc::clone(&repositories.staff),
        }
    }

    pub async fn list_staff(&self) -> Result<Vec<StaffMember>, StaffError> {
        let staff = self.staff.list_staff().await?;
        debug!("Listed {} healthcare professionals", staff.len());
        Ok(staff)
    }

    pub async fn register_staff(&self, request: RegisterStaffRequest) -> Result<StaffMember, StaffError> {
        let new_staff = request.validate()?;

        if self.staff.find_staff_by_name(&new_staff.name).await?.is_some() {
            return Err(StaffError::NameTaken(new_staff.name));
        }
        if self.staff.find_staff_by_employee_num(&new_staff.employee_num).await?.is_some() {
            return Err(StaffError::EmployeeNumTaken(new_staff.employee_num));
        }

        let name = new_staff.name.clone();
        let staff = match self.staff.insert_staff(new_staff).await {
            Err(DatabaseError::Conflict(_)) => return Err(StaffError::NameTaken(name)),
            result => result?,
        };

        info!("Registered {} {} ({})", staff.role, staff.name, staff.employee_num);
        Ok(staff)
    }

    pub async fn delete_staff(&self, staff_id: Uuid) -> Result<StaffMember, StaffError> {
        let staff = self
            .staff
            .find_staff_by_id(staff_id)
            .await?
            .ok_or(StaffError::NotFound(staff_id))?;

        self.staff.delete_staff(&staff).await?;

        info!("Deleted healthcare professional {}", staff.id);
        Ok(staff)
    }
}
