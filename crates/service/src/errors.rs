use thiserror::Error;

use models::errors::ModelError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("duplicate: {0}")]
    Duplicate(String),
    #[error("internal error: {0}")]
    Internal(String),
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl ServiceError {
    pub fn not_found(id: &str) -> Self { Self::NotFound(format!("no gift with ID <{id}> was found")) }
    pub fn duplicate(id: &str) -> Self { Self::Duplicate(format!("gift <{id}> exists already")) }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => Self::Validation(msg),
        }
    }
}
