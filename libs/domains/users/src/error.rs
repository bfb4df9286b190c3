use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

use crate::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum UserError {
    /// Input violated one or more field rules; carries every violation.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Invalid user id: {0}")]
    InvalidId(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type UserResult<T> = Result<T, UserError>;

/// Convert UserError to AppError for standardized error responses
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Validation(violations) => AppError::validation(&violations),
            UserError::NotFound(id) => AppError::NotFound(format!("User {} not found", id)),
            UserError::InvalidId(id) => AppError::InvalidId(format!("invalid user id: {}", id)),
            UserError::PasswordHash(msg) => AppError::InternalServerError(msg),
            UserError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for UserError {
    fn from(err: mongodb::error::Error) -> Self {
        UserError::Database(err.to_string())
    }
}
