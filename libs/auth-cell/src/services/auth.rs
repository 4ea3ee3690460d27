use std::sync::Arc;
use tracing::{debug, info, warn};

use shared_config::AppConfig;
use shared_database::{DatabaseError, Repositories, UserRepository};
use shared_models::auth::{NewUserAccount, UserAccount};
use shared_models::staff::EMPLOYEE_NUM_MAX_LEN;
use shared_utils::jwt::issue_token;
use shared_utils::password::{hash_password, verify_password};

use crate::models::{AuthError, LoginResponse};

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    jwt_secret: String,
    token_ttl_hours: i64,
}

impl AuthService {
    pub fn new(config: &AppConfig, repositories: &Repositories) -> Self {
        Self {
            users: Arc::clone(&repositories.users),
            jwt_secret: config.jwt_secret.clone(),
            token_ttl_hours: config.token_ttl_hours,
        }
    }

    /// Checks the password and issues a signed session token.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, AuthError> {
        debug!("Login attempt for {}", username);

        let account = match self.users.find_user_by_username(username).await? {
            Some(account) => account,
            None => {
                warn!("Login failed: unknown user {}", username);
                return Err(AuthError::InvalidCredentials);
            }
        };

        let matches = verify_password(password, &account.password_hash)
            .map_err(|e| AuthError::Hashing(e.to_string()))?;
        if !matches {
            warn!("Login failed: wrong password for {}", username);
            return Err(AuthError::InvalidCredentials);
        }

        let user = account.to_user();
        let token = issue_token(&user, &self.jwt_secret, self.token_ttl_hours)
            .map_err(AuthError::Token)?;

        info!("User {} logged in", account.username);
        Ok(LoginResponse {
            token,
            token_type: "Bearer",
            expires_in: self.token_ttl_hours * 3600,
            user,
        })
    }

    pub async fn register_account(
        &self,
        username: &str,
        employee_num: &str,
        password: &str,
    ) -> Result<UserAccount, AuthError> {
        if username.trim().is_empty() {
            return Err(AuthError::ValidationError("Username is required".to_string()));
        }
        if password.is_empty() {
            return Err(AuthError::ValidationError("Password is required".to_string()));
        }
        if employee_num.is_empty() || employee_num.chars().count() > EMPLOYEE_NUM_MAX_LEN {
            return Err(AuthError::ValidationError(format!(
                "Employee number must be 1 to {} characters", EMPLOYEE_NUM_MAX_LEN
            )));
        }

        let password_hash = hash_password(password).map_err(|e| AuthError::Hashing(e.to_string()))?;

        let inserted = self.users.insert_user(NewUserAccount {
            username: username.trim().to_string(),
            employee_num: employee_num.to_string(),
            password_hash,
        }).await;

        let account = match inserted {
            Err(DatabaseError::Conflict(_)) => return Err(AuthError::UsernameTaken(username.to_string())),
            result => result?,
        };

        info!("Created account {} for employee {}", account.username, account.employee_num);
        Ok(account)
    }

    pub async fn account_exists(&self, username: &str) -> Result<bool, AuthError> {
        Ok(self.users.find_user_by_username(username).await?.is_some())
    }
}
