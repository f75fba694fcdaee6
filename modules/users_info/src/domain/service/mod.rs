use std::sync::Arc;

use tracing::{debug, field, info, instrument, warn, Span};

use crate::contract::model::{NewUser, PatchField, User, UserId, UserPatch};
use crate::domain::error::DomainError;
use crate::domain::repo::UsersRepository;


/// Domain service with business rules for user management.
/// Depends only on the repository port, not on infra types.
///
/// Holds no state besides the store handle, so one instance can be cloned and
/// shared between callers. Every rule is checked before the store is asked to
/// write; a rejected call never reaches `save` or `delete_by_id`.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn UsersRepository>,
}

impl Service {
    /// Create a service with dependencies.
    pub fn new(repo: Arc<dyn UsersRepository>) -> Self {
        Self { repo }
    }

    /// Register a new user. The stored user is always active.
    ///
    /// Checks run in a fixed order and stop at the first failure: missing
    /// user, blank username, blank email, taken username, taken email.
    #[instrument(
        name = "users_info.service.create_user",
        skip_all,
        fields(username = field::Empty, user_id = field::Empty)
    )]
    pub fn create_user(&self, user: impl Into<Option<NewUser>>) -> Result<User, DomainError> {
        let Some(new_user) = user.into() else {
            warn!("Rejected create: no user supplied");
            return Err(DomainError::null_user());
        };
        Span::current().record("username", new_user.username.as_str());
        info!("Creating new user");

        validate_required(&new_user.username, DomainError::empty_username)?;
        validate_required(&new_user.email, DomainError::empty_email)?;
        self.ensure_username_free(&new_user.username)?;
        self.ensure_email_free(&new_user.email)?;

        let user = User {
            id: None,
            username: new_user.username,
            email: new_user.email,
            active: true,
        };
        let saved = self.repo.save(user)?;

        if let Some(id) = saved.id {
            Span::current().record("user_id", id);
        }
        info!("Successfully created user");
        Ok(saved)
    }

    /// Look up a user by id. A missing user is `Ok(None)`.
    #[instrument(
        name = "users_info.service.get_user_by_id",
        skip_all,
        fields(user_id = field::Empty)
    )]
    pub fn get_user_by_id(
        &self,
        id: impl Into<Option<UserId>>,
    ) -> Result<Option<User>, DomainError> {
        let id = require_id(id.into())?;
        debug!("Getting user by id");

        let user = self.repo.find_by_id(id)?;
        debug!(found = user.is_some(), "Lookup finished");
        Ok(user)
    }

    /// Look up a user by exact username. A missing user is `Ok(None)`.
    #[instrument(
        name = "users_info.service.get_user_by_username",
        skip_all,
        fields(username = field::Empty)
    )]
    pub fn get_user_by_username<'a>(
        &self,
        username: impl Into<Option<&'a str>>,
    ) -> Result<Option<User>, DomainError> {
        let username = username.into().unwrap_or_default();
        validate_required(username, DomainError::empty_username)?;
        Span::current().record("username", username);
        debug!("Getting user by username");

        Ok(self.repo.find_by_username(username)?)
    }

    #[instrument(name = "users_info.service.get_all_active_users", skip_all)]
    pub fn get_all_active_users(&self) -> Result<Vec<User>, DomainError> {
        debug!("Listing active users");
        let users = self.repo.find_active_users()?;
        debug!("Found {} active users", users.len());
        Ok(users)
    }

    /// Apply a partial update to an existing user.
    ///
    /// A supplied value equal to the current one is left alone. A different
    /// value is checked against every stored user, so a value owned by another
    /// user is a conflict. Nothing is persisted unless both fields pass.
    #[instrument(
        name = "users_info.service.update_user",
        skip_all,
        fields(user_id = field::Empty)
    )]
    pub fn update_user(
        &self,
        id: impl Into<Option<UserId>>,
        patch: impl Into<Option<UserPatch>>,
    ) -> Result<User, DomainError> {
        let id = require_id(id.into())?;
        let Some(patch) = patch.into() else {
            warn!("Rejected update: no patch supplied");
            return Err(DomainError::null_patch());
        };
        info!("Updating user");

        let mut current = self.load_existing(id)?;

        if let Some(username) =
            self.resolve_change(patch.username, &current.username, Field::Username)?
        {
            current.username = username;
        }
        if let Some(email) = self.resolve_change(patch.email, &current.email, Field::Email)? {
            current.email = email;
        }

        let saved = self.repo.save(current)?;
        info!("Successfully updated user");
        Ok(saved)
    }

    /// Mark a user inactive. Deactivating an inactive user succeeds.
    #[instrument(
        name = "users_info.service.deactivate_user",
        skip_all,
        fields(user_id = field::Empty)
    )]
    pub fn deactivate_user(&self, id: impl Into<Option<UserId>>) -> Result<(), DomainError> {
        let id = require_id(id.into())?;
        info!("Deactivating user");

        let mut user = self.load_existing(id)?;
        if !user.active {
            debug!("User already inactive");
        }
        user.active = false;
        self.repo.save(user)?;

        info!("Successfully deactivated user");
        Ok(())
    }

    /// Permanently remove a user.
    #[instrument(
        name = "users_info.service.delete_user",
        skip_all,
        fields(user_id = field::Empty)
    )]
    pub fn delete_user(&self, id: impl Into<Option<UserId>>) -> Result<(), DomainError> {
        let id = require_id(id.into())?;
        info!("Deleting user");

        self.load_existing(id)?;
        self.repo.delete_by_id(id)?;

        info!("Successfully deleted user");
        Ok(())
    }

    // --- helpers ---

    fn load_existing(&self, id: UserId) -> Result<User, DomainError> {
        self.repo.find_by_id(id)?.ok_or_else(|| {
            warn!("User not found");
            DomainError::user_not_found(id)
        })
    }

    fn ensure_username_free(&self, username: &str) -> Result<(), DomainError> {
        if self.repo.exists_by_username(username)? {
            warn!(username, "Username already taken");
            return Err(DomainError::username_already_exists(username));
        }
        Ok(())
    }

    fn ensure_email_free(&self, email: &str) -> Result<(), DomainError> {
        if self.repo.exists_by_email(email)? {
            warn!(email, "Email already taken");
            return Err(DomainError::email_already_exists(email));
        }
        Ok(())
    }

    /// Returns the value to write, or `None` when the field stays as is.
    fn resolve_change(
        &self,
        patch: PatchField<String>,
        current: &str,
        field: Field,
    ) -> Result<Option<String>, DomainError> {
        let value = match patch {
            PatchField::Omitted => return Ok(None),
            PatchField::Cleared => return Err(field.empty_error()),
            PatchField::Set(value) => value,
        };
        validate_required(&value, || field.empty_error())?;
        if value == current {
            return Ok(None);
        }
        match field {
            Field::Username => self.ensure_username_free(&value)?,
            Field::Email => self.ensure_email_free(&value)?,
        }
        Ok(Some(value))
    }
}

#[derive(Clone, Copy)]
enum Field {
    Username,
    Email,
}

impl Field {
    fn empty_error(self) -> DomainError {
        match self {
            Self::Username => DomainError::empty_username(),
            Self::Email => DomainError::empty_email(),
        }
    }
}

fn require_id(id: Option<UserId>) -> Result<UserId, DomainError> {
    match id {
        Some(id) if id > 0 => {
            Span::current().record("user_id", id);
            Ok(id)
        }
        _ => {
            warn!(?id, "Rejected invalid user id");
            Err(DomainError::invalid_id())
        }
    }
}

fn validate_required(value: &str, err: impl FnOnce() -> DomainError) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(err());
    }
    Ok(())
}
