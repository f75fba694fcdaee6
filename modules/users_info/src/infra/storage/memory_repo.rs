use std::collections::BTreeMap;

use parking_lot::RwLock;
use tracing::{debug, instrument, trace};

use crate::config::UsersInfoConfig;
use crate::contract::model::{User, UserId};
use crate::domain::repo::{RepoError, UniqueField, UsersRepository};

/// Reference store keeping users in process memory.
///
/// All state sits behind a single lock, so every operation is atomic and the
/// uniqueness check inside `save` cannot interleave with another write.
pub struct InMemoryUsersRepository {
    inner: RwLock<Inner>,
    unique_index: bool,
}

struct Inner {
    users: BTreeMap<UserId, User>,
    /// `None` once the id space is used up.
    next_id: Option<UserId>,
}

impl InMemoryUsersRepository {
    pub fn new(config: &UsersInfoConfig) -> Self {
        Self {
            inner: RwLock::new(Inner {
                users: BTreeMap::new(),
                next_id: Some(config.first_id.max(1)),
            }),
            unique_index: config.unique_index,
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().users.is_empty()
    }
}

impl Default for InMemoryUsersRepository {
    fn default() -> Self {
        Self::new(&UsersInfoConfig::default())
    }
}

impl Inner {
    /// First conflicting field held by a user other than `user.id`.
    fn conflict_for(&self, user: &User) -> Option<RepoError> {
        let others = || self.users.values().filter(move |u| u.id != user.id);
        if others().any(|u| u.username == user.username) {
            return Some(RepoError::unique_violation(
                UniqueField::Username,
                user.username.clone(),
            ));
        }
        if others().any(|u| u.email == user.email) {
            return Some(RepoError::unique_violation(
                UniqueField::Email,
                user.email.clone(),
            ));
        }
        None
    }
}

impl UsersRepository for InMemoryUsersRepository {
    #[instrument(name = "users_info.repo.save", skip_all, fields(user_id = ?user.id))]
    fn save(&self, mut user: User) -> Result<User, RepoError> {
        let mut inner = self.inner.write();

        if self.unique_index {
            if let Some(err) = inner.conflict_for(&user) {
                debug!(error = %err, "Unique index rejected write");
                return Err(err);
            }
        }

        let id = match user.id {
            Some(id) if id <= 0 => {
                return Err(RepoError::backend(format!("invalid user id: {id}")));
            }
            Some(id) => {
                // Keep the sequence ahead of ids that arrive from outside.
                if inner.next_id.is_some_and(|next| id >= next) {
                    inner.next_id = id.checked_add(1);
                }
                id
            }
            None => {
                let id = inner
                    .next_id
                    .ok_or_else(|| RepoError::backend("user id space exhausted"))?;
                inner.next_id = id.checked_add(1);
                user.id = Some(id);
                id
            }
        };

        inner.users.insert(id, user.clone());
        trace!(user_id = id, "Stored user");
        Ok(user)
    }

    #[instrument(name = "users_info.repo.find_by_id", skip(self))]
    fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepoError> {
        Ok(self.inner.read().users.get(&id).cloned())
    }

    #[instrument(name = "users_info.repo.find_by_username", skip(self))]
    fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .inner
            .read()
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    fn find_all(&self) -> Result<Vec<User>, RepoError> {
        Ok(self.inner.read().users.values().cloned().collect())
    }

    fn find_active_users(&self) -> Result<Vec<User>, RepoError> {
        Ok(self
            .inner
            .read()
            .users
            .values()
            .filter(|u| u.active)
            .cloned()
            .collect())
    }

    #[instrument(name = "users_info.repo.delete_by_id", skip(self))]
    fn delete_by_id(&self, id: UserId) -> Result<(), RepoError> {
        let removed = self.inner.write().users.remove(&id);
        trace!(removed = removed.is_some(), "Delete finished");
        Ok(())
    }

    fn exists_by_username(&self, username: &str) -> Result<bool, RepoError> {
        Ok(self
            .inner
            .read()
            .users
            .values()
            .any(|u| u.username == username))
    }

    fn exists_by_email(&self, email: &str) -> Result<bool, RepoError> {
        Ok(self.inner.read().users.values().any(|u| u.email == email))
    }
}
