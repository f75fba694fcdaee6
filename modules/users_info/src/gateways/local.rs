use std::sync::Arc;

use crate::contract::{
    client::UsersInfoApi,
    error::UsersInfoError,
    model::{NewUser, User, UserId, UserPatch},
};
use crate::domain::service::Service;

/// Local implementation of the UsersInfoApi trait that delegates to the domain service
pub struct UsersInfoLocalClient {
    service: Arc<Service>,
}

impl UsersInfoLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

impl UsersInfoApi for UsersInfoLocalClient {
    fn create_user(&self, new_user: NewUser) -> Result<User, UsersInfoError> {
        Ok(self.service.create_user(new_user)?)
    }

    fn get_user(&self, id: UserId) -> Result<Option<User>, UsersInfoError> {
        Ok(self.service.get_user_by_id(id)?)
    }

    fn find_user(&self, username: &str) -> Result<Option<User>, UsersInfoError> {
        Ok(self.service.get_user_by_username(username)?)
    }

    fn list_active_users(&self) -> Result<Vec<User>, UsersInfoError> {
        Ok(self.service.get_all_active_users()?)
    }

    fn update_user(&self, id: UserId, patch: UserPatch) -> Result<User, UsersInfoError> {
        Ok(self.service.update_user(id, patch)?)
    }

    fn deactivate_user(&self, id: UserId) -> Result<(), UsersInfoError> {
        Ok(self.service.deactivate_user(id)?)
    }

    fn delete_user(&self, id: UserId) -> Result<(), UsersInfoError> {
        Ok(self.service.delete_user(id)?)
    }
}
