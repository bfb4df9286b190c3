//! User Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::factory::new_user_from_params;
use crate::models::{CreateUserParams, UpdateUserParams, UserResponse};
use crate::password::PasswordHasher;
use crate::repository::UserRepository;
use crate::validation::validate_update;

/// Service layer for User business logic.
///
/// Every mutation is validated here before it reaches the repository.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    hasher: PasswordHasher,
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            hasher: self.hasher,
        }
    }
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R, hasher: PasswordHasher) -> Self {
        Self {
            repository: Arc::new(repository),
            hasher,
        }
    }

    /// Validate, hash the password and persist a new user
    #[instrument(skip(self, params))]
    pub async fn create_user(&self, params: CreateUserParams) -> UserResult<UserResponse> {
        let hasher = self.hasher;
        let built = tokio::task::spawn_blocking(move || new_user_from_params(&params, &hasher))
            .await
            .map_err(|e| UserError::PasswordHash(format!("hashing task failed: {}", e)))??;
        let user = built.map_err(UserError::Validation)?;

        let created = self.repository.create(user).await?;
        Ok(created.into())
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: &str) -> UserResult<UserResponse> {
        let user = self.repository.get_by_id(id).await?;
        Ok(user.into())
    }

    #[instrument(skip(self))]
    pub async fn list_users(&self) -> UserResult<Vec<UserResponse>> {
        let users = self.repository.list().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// Validate and apply new name/email values, returning the stored result
    #[instrument(skip(self, params))]
    pub async fn update_user(
        &self,
        id: &str,
        params: UpdateUserParams,
    ) -> UserResult<UserResponse> {
        let violations = validate_update(&params);
        if !violations.is_empty() {
            return Err(UserError::Validation(violations));
        }

        let user = self.repository.update(id, params).await?;
        Ok(user.into())
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: &str) -> UserResult<()> {
        self.repository.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use crate::password::MIN_COST;
    use crate::repository::MockUserRepository;
    use mongodb::bson::oid::ObjectId;

    fn service(repo: MockUserRepository) -> UserService<MockUserRepository> {
        UserService::new(repo, PasswordHasher::new(MIN_COST))
    }

    fn stored_user(id: ObjectId) -> User {
        User {
            id: Some(id),
            first_name: "Al".into(),
            last_name: "Xu".into(),
            email: "a@b.com".into(),
            encrypted_password: "hash".into(),
        }
    }

    #[tokio::test]
    async fn test_create_user_hashes_and_persists() {
        let oid = ObjectId::new();
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .withf(|user| {
                user.id.is_none()
                    && user.email == "a@b.com"
                    && user.encrypted_password != "longpass"
                    && bcrypt::verify("longpass", &user.encrypted_password).unwrap_or(false)
            })
            .times(1)
            .returning(move |mut user| {
                user.id = Some(oid);
                Ok(user)
            });

        let created = service(repo)
            .create_user(CreateUserParams {
                first_name: "Al".into(),
                last_name: "Xu".into(),
                email: "a@b.com".into(),
                password: "longpass".into(),
            })
            .await
            .unwrap();

        assert_eq!(created.id, Some(oid.to_hex()));
        assert_eq!(created.first_name, "Al");
    }

    #[tokio::test]
    async fn test_create_user_rejects_invalid_without_touching_repository() {
        let mut repo = MockUserRepository::new();
        repo.expect_create().never();

        let err = service(repo)
            .create_user(CreateUserParams {
                first_name: "A".into(),
                last_name: "Xu".into(),
                email: "bad".into(),
                password: "short".into(),
            })
            .await
            .unwrap_err();

        match err {
            UserError::Validation(violations) => {
                assert_eq!(
                    violations.fields().collect::<Vec<_>>(),
                    vec!["email", "firstName", "password"]
                );
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_user_validates_first() {
        let mut repo = MockUserRepository::new();
        repo.expect_update().never();

        let err = service(repo)
            .update_user(
                &ObjectId::new().to_hex(),
                UpdateUserParams {
                    first_name: "Al".into(),
                    last_name: "Xu".into(),
                    email: "not-an-email".into(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::Validation(v) if v.contains("email")));
    }

    #[tokio::test]
    async fn test_update_user_returns_stored_entity() {
        let oid = ObjectId::new();
        let id = oid.to_hex();
        let mut repo = MockUserRepository::new();
        let expected = id.clone();
        repo.expect_update()
            .withf(move |id, _| id == expected)
            .times(1)
            .returning(move |_, params| {
                let mut user = stored_user(oid);
                user.email = params.email;
                Ok(user)
            });

        let updated = service(repo)
            .update_user(
                &id,
                UpdateUserParams {
                    first_name: "Al".into(),
                    last_name: "Xu".into(),
                    email: "new@b.com".into(),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.email, "new@b.com");
        assert_eq!(updated.id, Some(id));
    }

    #[tokio::test]
    async fn test_get_user_propagates_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id()
            .times(1)
            .returning(|id| Err(UserError::NotFound(id.to_string())));

        let err = service(repo).get_user("6571f2a9c3e4b5a6d7e8f901").await.unwrap_err();
        assert!(matches!(err, UserError::NotFound(id) if id == "6571f2a9c3e4b5a6d7e8f901"));
    }

    #[tokio::test]
    async fn test_list_users_maps_to_responses() {
        let mut repo = MockUserRepository::new();
        repo.expect_list()
            .times(1)
            .returning(|| Ok(vec![stored_user(ObjectId::new()), stored_user(ObjectId::new())]));

        let users = service(repo).list_users().await.unwrap();
        assert_eq!(users.len(), 2);
        assert!(users.iter().all(|u| u.id.is_some()));
    }

    #[tokio::test]
    async fn test_delete_user_passes_through() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete().times(1).returning(|_| Ok(()));
        assert!(service(repo).delete_user("6571f2a9c3e4b5a6d7e8f901").await.is_ok());
    }

    #[tokio::test]
    async fn test_database_error_propagates() {
        let mut repo = MockUserRepository::new();
        repo.expect_list()
            .returning(|| Err(UserError::Database("connection refused".into())));

        let err = service(repo).list_users().await.unwrap_err();
        assert!(matches!(err, UserError::Database(_)));
    }
}
