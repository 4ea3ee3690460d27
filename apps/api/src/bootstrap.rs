use anyhow::{Context, Result};
use tracing::{info, warn};

use auth_cell::AuthService;
use shared_config::AppConfig;
use shared_database::{Repositories, StaffRepository};
use shared_models::{NewStaffMember, StaffRole};

/// Creates the first doctor and its login when the configured account is
/// missing. Returns whether anything was created.
pub async fn ensure_bootstrap_account(config: &AppConfig, repositories: &Repositories) -> Result<bool> {
    let Some(account) = config.bootstrap_account() else {
        warn!("No bootstrap account configured");
        return Ok(false);
    };

    let auth = AuthService::new(config, repositories);
    if auth.account_exists(&account.username).await? {
        info!("Bootstrap account {} already exists", account.username);
        return Ok(false);
    }

    let existing = repositories
        .staff
        .find_staff_by_employee_num(&account.employee_num)
        .await
        .context("looking up bootstrap doctor")?;

    match existing {
        Some(member) if !member.is_doctor() => {
            anyhow::bail!(
                "employee number {} belongs to a {}, not a doctor",
                account.employee_num,
                member.role
            );
        }
        Some(_) => {}
        None => {
            repositories
                .staff
                .insert_staff(NewStaffMember {
                    name: account.username.clone(),
                    employee_num: account.employee_num.clone(),
                    role: StaffRole::Doctor,
                })
                .await
                .context("creating bootstrap doctor")?;
        }
    }

    auth.register_account(&account.username, &account.employee_num, &account.password)
        .await?;

    info!("Created bootstrap doctor account {}", account.username);
    Ok(true)
}
