use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{UpdateUserParams, User};

/// Repository trait for User persistence, one logical `users` collection keyed by id.
///
/// Ids are passed as the 24-hex-digit ObjectId string; a malformed one is
/// [`UserError::InvalidId`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_by_id(&self, id: &str) -> UserResult<User>;

    /// All users, unordered
    async fn list(&self) -> UserResult<Vec<User>>;

    /// Persist a user that has no id yet and return it with the assigned id
    async fn create(&self, user: User) -> UserResult<User>;

    async fn delete(&self, id: &str) -> UserResult<()>;

    /// Overwrite the name and email fields and return the updated user.
    ///
    /// Does not validate and never touches the password hash.
    async fn update(&self, id: &str, params: UpdateUserParams) -> UserResult<User>;
}

/// Parse a path id into an ObjectId
pub fn parse_id(id: &str) -> UserResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| UserError::InvalidId(id.to_string()))
}

/// In-memory implementation of UserRepository (for testing and local development)
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<ObjectId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get_by_id(&self, id: &str) -> UserResult<User> {
        let oid = parse_id(id)?;
        let users = self.users.read().await;
        users
            .get(&oid)
            .cloned()
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users.values().cloned().collect())
    }

    async fn create(&self, mut user: User) -> UserResult<User> {
        let oid = ObjectId::new();
        user.id = Some(oid);

        let mut users = self.users.write().await;
        users.insert(oid, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: &str) -> UserResult<()> {
        let oid = parse_id(id)?;
        let mut users = self.users.write().await;
        users
            .remove(&oid)
            .map(|_| ())
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }

    async fn update(&self, id: &str, params: UpdateUserParams) -> UserResult<User> {
        let oid = parse_id(id)?;
        let mut users = self.users.write().await;
        let user = users
            .get_mut(&oid)
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;

        user.first_name = params.first_name;
        user.last_name = params.last_name;
        user.email = params.email;

        Ok(user.clone())
    }
}
