use std::fmt;

use thiserror::Error;

use crate::contract::model::{User, UserId};

/// Attribute guarded by a uniqueness invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Username,
    Email,
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Username => f.write_str("username"),
            Self::Email => f.write_str("email"),
        }
    }
}

/// Errors raised by store adapters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// A unique index rejected the write.
    #[error("unique constraint on {field} violated by '{value}'")]
    UniqueViolation { field: UniqueField, value: String },

    /// The backing storage failed.
    #[error("store backend failure: {message}")]
    Backend { message: String },
}

impl RepoError {
    pub fn unique_violation(field: UniqueField, value: impl Into<String>) -> Self {
        Self::UniqueViolation {
            field,
            value: value.into(),
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

/// Port for the domain layer: persistence operations the domain needs.
///
/// The store owns physical storage and identity assignment and knows nothing
/// about business rules. Lookups report "not found" as `Ok(None)`, never as an
/// error. Every call either returns a result or fails as a whole.
#[cfg_attr(test, mockall::automock)]
pub trait UsersRepository: Send + Sync {
    /// Persist a user, assigning an id when `user.id` is `None`.
    ///
    /// Returns the stored representation. Adapters backed by a unique index
    /// reject conflicting writes with [`RepoError::UniqueViolation`].
    fn save(&self, user: User) -> Result<User, RepoError>;

    /// Load a user by id.
    fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepoError>;

    /// Load a user by exact username.
    fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    /// Every stored user, in no guaranteed order.
    fn find_all(&self) -> Result<Vec<User>, RepoError>;

    /// Users with `active == true`.
    fn find_active_users(&self) -> Result<Vec<User>, RepoError>;

    /// Remove a user. Removing a missing id is a no-op.
    fn delete_by_id(&self, id: UserId) -> Result<(), RepoError>;

    /// Uniqueness probe by username.
    fn exists_by_username(&self, username: &str) -> Result<bool, RepoError>;

    /// Uniqueness probe by email.
    fn exists_by_email(&self, email: &str) -> Result<bool, RepoError>;
}
