use shared_config::AppConfig;
use shared_database::Repositories;

/// Shared handler state: configuration plus the storage handles every
/// per-request service is built from.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub repositories: Repositories,
}

impl AppState {
    pub fn new(config: AppConfig, repositories: Repositories) -> Self {
        Self { config, repositories }
    }
}
