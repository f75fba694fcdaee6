use thiserror::Error;

use crate::domain::error::DomainError;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsersInfoError {
    #[error("{message}")]
    Validation { message: String },

    #[error("{message}")]
    Conflict { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("Internal error")]
    Internal,
}

impl UsersInfoError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}

impl From<DomainError> for UsersInfoError {
    fn from(domain_error: DomainError) -> Self {
        match domain_error {
            DomainError::InvalidArgument { message } => Self::validation(message),
            DomainError::Conflict { message } => Self::conflict(message),
            DomainError::NotFound { message } => Self::not_found(message),
            DomainError::Storage { .. } => Self::internal(),
        }
    }
}
