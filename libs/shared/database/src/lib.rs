pub mod error;
pub mod memory;
pub mod repository;
pub mod rest;
pub mod supabase;

use std::sync::Arc;

use shared_config::{AppConfig, StorageBackend};
use tracing::info;

pub use error::DatabaseError;
pub use memory::InMemoryRepository;
pub use repository::{
    AppointmentRepository, DbResult, PatientRepository, PrescriptionRepository,
    StaffRepository, UserRepository,
};
pub use rest::SupabaseRepository;

/// One handle per storage concern, passed explicitly to every service.
#[derive(Clone)]
pub struct Repositories {
    pub appointments: Arc<dyn AppointmentRepository>,
    pub patients: Arc<dyn PatientRepository>,
    pub staff: Arc<dyn StaffRepository>,
    pub prescriptions: Arc<dyn PrescriptionRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl Repositories {
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: AppointmentRepository
            + PatientRepository
            + StaffRepository
            + PrescriptionRepository
            + UserRepository
            + 'static,
    {
        Self {
            appointments: store.clone(),
            patients: store.clone(),
            staff: store.clone(),
            prescriptions: store.clone(),
            users: store,
        }
    }

    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(InMemoryRepository::new()))
    }

    pub fn supabase(config: &AppConfig) -> Self {
        Self::from_store(Arc::new(SupabaseRepository::new(config)))
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, DatabaseError> {
        match config.storage {
            StorageBackend::Memory => {
                info!("Using in-memory storage");
                Ok(Self::in_memory())
            }
            StorageBackend::Supabase => {
                if !config.is_supabase_configured() {
                    return Err(DatabaseError::Configuration(
                        "SUPABASE_URL and SUPABASE_SERVICE_KEY are required for supabase storage".to_string(),
                    ));
                }
                info!("Using Supabase storage at {}", config.supabase_url);
                Ok(Self::supabase(config))
            }
        }
    }
}
