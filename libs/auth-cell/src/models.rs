use serde::{Deserialize, Serialize};

use shared_database::DatabaseError;
use shared_models::auth::User;
use shared_models::error::AppError;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: &'static str,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: User,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Username {0} is already taken")]
    UsernameTaken(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token error: {0}")]
    Token(String),

    #[error("Repository error: {0}")]
    Repository(#[from] DatabaseError),
}

impl From<AuthError> for AppError {
    fn from(error: AuthError) -> Self {
        let message = error.to_string();
        match error {
            AuthError::InvalidCredentials => AppError::Auth(message),
            AuthError::UsernameTaken(_) => AppError::Conflict(message),
            AuthError::ValidationError(_) => AppError::ValidationError(message),
            AuthError::Hashing(_) | AuthError::Token(_) => AppError::Internal(message),
            AuthError::Repository(_) => AppError::Database(message),
        }
    }
}
