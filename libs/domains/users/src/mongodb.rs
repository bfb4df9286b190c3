//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{Document, doc},
    options::ReturnDocument,
};
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::models::{UpdateUserParams, User};
use crate::repository::{UserRepository, parse_id};

/// Collection holding user documents
pub const USERS_COLLECTION: &str = "users";

/// MongoDB implementation of the UserRepository
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    /// # Example
    /// ```ignore
    /// let client = database::mongodb::connect(&url).await?;
    /// let repo = MongoUserRepository::new(client.database("accounts"));
    /// ```
    pub fn new(db: Database) -> Self {
        Self {
            collection: db.collection::<User>(USERS_COLLECTION),
        }
    }

    fn update_document(params: &UpdateUserParams) -> Document {
        doc! {
            "$set": {
                "firstName": params.first_name.as_str(),
                "lastName": params.last_name.as_str(),
                "email": params.email.as_str(),
            }
        }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self))]
    async fn get_by_id(&self, id: &str) -> UserResult<User> {
        let oid = parse_id(id)?;
        self.collection
            .find_one(doc! { "_id": oid })
            .await?
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> UserResult<Vec<User>> {
        let cursor = self.collection.find(doc! {}).await?;
        let users: Vec<User> = cursor.try_collect().await?;
        Ok(users)
    }

    #[instrument(skip(self, user))]
    async fn create(&self, mut user: User) -> UserResult<User> {
        let result = self.collection.insert_one(&user).await?;
        let oid = result.inserted_id.as_object_id().ok_or_else(|| {
            UserError::Database(format!(
                "insert returned a non-ObjectId id: {}",
                result.inserted_id
            ))
        })?;
        user.id = Some(oid);

        tracing::info!(user_id = %oid, "User created successfully");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> UserResult<()> {
        let oid = parse_id(id)?;
        let result = self.collection.delete_one(doc! { "_id": oid }).await?;

        if result.deleted_count == 0 {
            return Err(UserError::NotFound(id.to_string()));
        }

        tracing::info!(user_id = %oid, "User deleted successfully");
        Ok(())
    }

    #[instrument(skip(self, params))]
    async fn update(&self, id: &str, params: UpdateUserParams) -> UserResult<User> {
        let oid = parse_id(id)?;
        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": oid }, Self::update_document(&params))
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;

        tracing::info!(user_id = %oid, "User updated successfully");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_document_sets_only_profile_fields() {
        let params = UpdateUserParams {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
        };
        let update = MongoUserRepository::update_document(&params);
        let set = update.get_document("$set").unwrap();

        assert_eq!(set.len(), 3);
        assert_eq!(set.get_str("firstName").unwrap(), "Ada");
        assert_eq!(set.get_str("lastName").unwrap(), "Lovelace");
        assert_eq!(set.get_str("email").unwrap(), "ada@example.com");
        assert!(!set.contains_key("encryptedPassword"));
    }
}
