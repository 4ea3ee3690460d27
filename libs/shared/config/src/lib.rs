use std::env;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    Memory,
    Supabase,
}

/// Credentials for the first doctor account, created at startup when absent.
#[derive(Debug, Clone)]
pub struct BootstrapAccount {
    pub username: String,
    pub password: String,
    pub employee_num: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_service_key: String,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub storage: StorageBackend,
    pub bind_addr: String,
    pub bootstrap_username: String,
    pub bootstrap_password: String,
    pub bootstrap_employee_num: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            supabase_url: env::var("SUPABASE_URL")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_URL not set, using empty value");
                    String::new()
                }),
            supabase_service_key: env::var("SUPABASE_SERVICE_KEY")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_SERVICE_KEY not set, using empty value");
                    String::new()
                }),
            jwt_secret: env::var("CLINIC_JWT_SECRET")
                .unwrap_or_else(|_| {
                    warn!("CLINIC_JWT_SECRET not set, using empty value");
                    String::new()
                }),
            token_ttl_hours: env::var("CLINIC_TOKEN_TTL_HOURS")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(12),
            storage: match env::var("CLINIC_STORAGE").as_deref() {
                Ok("supabase") => StorageBackend::Supabase,
                Ok("memory") | Err(_) => StorageBackend::Memory,
                Ok(other) => {
                    warn!("Unknown CLINIC_STORAGE value '{}', using in-memory storage", other);
                    StorageBackend::Memory
                }
            },
            bind_addr: env::var("CLINIC_BIND_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            bootstrap_username: env::var("CLINIC_BOOTSTRAP_USERNAME").unwrap_or_default(),
            bootstrap_password: env::var("CLINIC_BOOTSTRAP_PASSWORD").unwrap_or_default(),
            bootstrap_employee_num: env::var("CLINIC_BOOTSTRAP_EMPLOYEE_NUM").unwrap_or_default(),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.jwt_secret.is_empty()
            && (self.storage == StorageBackend::Memory || self.is_supabase_configured())
    }

    pub fn is_supabase_configured(&self) -> bool {
        !self.supabase_url.is_empty() && !self.supabase_service_key.is_empty()
    }

    pub fn bootstrap_account(&self) -> Option<BootstrapAccount> {
        if self.bootstrap_username.is_empty()
            || self.bootstrap_password.is_empty()
            || self.bootstrap_employee_num.is_empty()
        {
            return None;
        }

        Some(BootstrapAccount {
            username: self.bootstrap_username.clone(),
            password: self.bootstrap_password.clone(),
            employee_num: self.bootstrap_employee_num.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> AppConfig {
        AppConfig {
            supabase_url: String::new(),
            supabase_service_key: String::new(),
            jwt_secret: "secret".to_string(),
            token_ttl_hours: 12,
            storage: StorageBackend::Memory,
            bind_addr: "127.0.0.1:3000".to_string(),
            bootstrap_username: String::new(),
            bootstrap_password: String::new(),
            bootstrap_employee_num: String::new(),
        }
    }

    #[test]
    fn memory_storage_needs_only_jwt_secret() {
        assert!(base_config().is_configured());
    }

    #[test]
    fn supabase_storage_needs_url_and_key() {
        let mut config = base_config();
        config.storage = StorageBackend::Supabase;
        assert!(!config.is_configured());

        config.supabase_url = "http://localhost:54321".to_string();
        config.supabase_service_key = "service-key".to_string();
        assert!(config.is_configured());
    }

    #[test]
    fn bootstrap_account_requires_all_fields() {
        let mut config = base_config();
        config.bootstrap_username = "David".to_string();
        config.bootstrap_password = "cat".to_string();
        assert!(config.bootstrap_account().is_none());

        config.bootstrap_employee_num = "DC001".to_string();
        let account = config.bootstrap_account().unwrap();
        assert_eq!(account.username, "David");
        assert_eq!(account.employee_num, "DC001");
    }
}
