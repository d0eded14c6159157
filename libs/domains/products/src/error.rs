use axum::http::StatusCode;
use thiserror::Error;
use uuid::Uuid;

use crate::validate::FieldError;

/// Errors produced by product operations
#[derive(Debug, Error)]
pub enum ProductError {
    /// Input failed validation; carries every field-level failure
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Product not found: {0}")]
    NotFound(Uuid),

    /// Another product already uses this name
    #[error("Product with name '{0}' already exists")]
    DuplicateName(String),

    #[error("Database error: {0}")]
    Database(String),

    /// View-cache failure; logged by the service, never returned to clients
    #[error("Cache error: {0}")]
    Cache(String),
}

impl ProductError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProductError::Validation(_) => StatusCode::BAD_REQUEST,
            ProductError::NotFound(_) => StatusCode::NOT_FOUND,
            ProductError::DuplicateName(_) => StatusCode::CONFLICT,
            ProductError::Database(_) | ProductError::Cache(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}

impl From<redis::RedisError> for ProductError {
    fn from(err: redis::RedisError) -> Self {
        ProductError::Cache(err.to_string())
    }
}

pub type ProductResult<T> = Result<T, ProductError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_per_variant() {
        assert_eq!(
            ProductError::Validation(vec![]).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ProductError::NotFound(Uuid::nil()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ProductError::DuplicateName("X".to_string()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ProductError::Database("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn display_messages() {
        assert_eq!(ProductError::Validation(vec![]).to_string(), "Validation failed");
        assert_eq!(
            ProductError::DuplicateName("Lamp".to_string()).to_string(),
            "Product with name 'Lamp' already exists"
        );
    }
}
