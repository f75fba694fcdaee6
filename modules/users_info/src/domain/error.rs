use thiserror::Error;

use crate::contract::model::UserId;
use crate::domain::repo::{RepoError, UniqueField};

/// Coarse classification callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    Conflict,
    NotFound,
    Storage,
}

/// Domain-specific errors using thiserror
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Missing or malformed caller input.
    #[error("{message}")]
    InvalidArgument { message: String },

    /// The write would break username or email uniqueness.
    #[error("{message}")]
    Conflict { message: String },

    /// An id-addressed mutation referenced a user that does not exist.
    #[error("{message}")]
    NotFound { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn null_user() -> Self {
        Self::invalid_argument("User cannot be null")
    }

    pub fn null_patch() -> Self {
        Self::invalid_argument("Updated user cannot be null")
    }

    pub fn empty_username() -> Self {
        Self::invalid_argument("Username cannot be empty")
    }

    pub fn empty_email() -> Self {
        Self::invalid_argument("Email cannot be empty")
    }

    pub fn invalid_id() -> Self {
        Self::invalid_argument("Invalid user ID")
    }

    pub fn username_already_exists(username: impl AsRef<str>) -> Self {
        Self::Conflict {
            message: format!("Username already exists: {}", username.as_ref()),
        }
    }

    pub fn email_already_exists(email: impl AsRef<str>) -> Self {
        Self::Conflict {
            message: format!("Email already exists: {}", email.as_ref()),
        }
    }

    pub fn user_not_found(id: UserId) -> Self {
        Self::NotFound {
            message: format!("User not found with id: {id}"),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Storage { .. } => ErrorKind::Storage,
        }
    }
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::UniqueViolation {
                field: UniqueField::Username,
                value,
            } => Self::username_already_exists(value),
            RepoError::UniqueViolation {
                field: UniqueField::Email,
                value,
            } => Self::email_already_exists(value),
            RepoError::Backend { message } => Self::storage(message),
        }
    }
}
