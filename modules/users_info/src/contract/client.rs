use crate::contract::{
    error::UsersInfoError,
    model::{NewUser, User, UserId, UserPatch},
};

/// Public API trait for the users_info module that other modules can use
pub trait UsersInfoApi: Send + Sync {
    /// Create a new, active user
    fn create_user(&self, new_user: NewUser) -> Result<User, UsersInfoError>;

    /// Get a user by ID; `None` if it does not exist
    fn get_user(&self, id: UserId) -> Result<Option<User>, UsersInfoError>;

    /// Get a user by username; `None` if it does not exist
    fn find_user(&self, username: &str) -> Result<Option<User>, UsersInfoError>;

    /// List all active users
    fn list_active_users(&self) -> Result<Vec<User>, UsersInfoError>;

    /// Update a user with partial data
    fn update_user(&self, id: UserId, patch: UserPatch) -> Result<User, UsersInfoError>;

    /// Mark a user inactive
    fn deactivate_user(&self, id: UserId) -> Result<(), UsersInfoError>;

    /// Delete a user by ID
    fn delete_user(&self, id: UserId) -> Result<(), UsersInfoError>;
}
