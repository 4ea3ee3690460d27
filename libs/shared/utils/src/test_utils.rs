use std::sync::Arc;
use chrono::Utc;
use uuid::Uuid;

use shared_config::{AppConfig, StorageBackend};
use shared_database::{DatabaseError, Repositories};
use shared_models::auth::User;
use shared_models::{NewStaffMember, StaffMember, StaffRole};

use crate::jwt::issue_token;
use crate::state::AppState;

pub struct TestConfig {
    pub jwt_secret: String,
    pub supabase_url: String,
    pub supabase_service_key: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "test-secret-key-for-jwt-validation-must-be-long-enough".to_string(),
            supabase_url: "http://localhost:54321".to_string(),
            supabase_service_key: "test-service-key".to_string(),
        }
    }
}

impl TestConfig {
    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            supabase_url: self.supabase_url.clone(),
            supabase_service_key: self.supabase_service_key.clone(),
            jwt_secret: self.jwt_secret.clone(),
            token_ttl_hours: 12,
            storage: StorageBackend::Memory,
            bind_addr: "127.0.0.1:0".to_string(),
            bootstrap_username: String::new(),
            bootstrap_password: String::new(),
            bootstrap_employee_num: String::new(),
        }
    }

    /// Handler state backed by a fresh in-memory store.
    pub fn to_state(&self) -> Arc<AppState> {
        Arc::new(AppState::new(self.to_app_config(), Repositories::in_memory()))
    }
}

pub struct TestUser {
    pub id: String,
    pub username: String,
    pub employee_num: String,
}

impl Default for TestUser {
    fn default() -> Self {
        Self::new("reception", "RC001")
    }
}

impl TestUser {
    pub fn new(username: &str, employee_num: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            employee_num: employee_num.to_string(),
        }
    }

    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            username: self.username.clone(),
            employee_num: self.employee_num.clone(),
            created_at: Some(Utc::now()),
        }
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(user: &TestUser, secret: &str, exp_hours: Option<i64>) -> String {
        issue_token(&user.to_user(), secret, exp_hours.unwrap_or(24))
            .expect("test secret is not empty")
    }

    pub fn create_expired_token(user: &TestUser, secret: &str) -> String {
        Self::create_test_token(user, secret, Some(-1))
    }

    pub fn create_invalid_signature_token(user: &TestUser) -> String {
        Self::create_test_token(user, "wrong-secret", Some(24))
    }

    pub fn create_malformed_token() -> String {
        "invalid.token.format".to_string()
    }
}

/// Inserts a healthcare professional straight into the store.
pub async fn seed_staff(
    repositories: &Repositories,
    name: &str,
    employee_num: &str,
    role: StaffRole,
) -> Result<StaffMember, DatabaseError> {
    repositories.staff.insert_staff(NewStaffMember {
        name: name.to_string(),
        employee_num: employee_num.to_string(),
        role,
    }).await
}
