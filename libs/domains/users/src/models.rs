use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Persisted user document.
///
/// Serializes to the stored shape `{ _id, firstName, lastName, email, encryptedPassword }`.
/// Never hand this to a client; use [`UserResponse`].
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Assigned by the store on insert
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// bcrypt hash; set once at creation
    pub encrypted_password: String,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("encrypted_password", &"[REDACTED]")
            .finish()
    }
}

/// Outward representation of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// 24-hex-digit ObjectId
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "6571f2a9c3e4b5a6d7e8f901")]
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.map(|id| id.to_hex()),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
        }
    }
}

/// Payload for creating a user.
///
/// Missing fields deserialize as empty strings so they surface as field violations.
#[derive(Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateUserParams {
    #[validate(custom(function = "crate::validation::first_name_length"))]
    #[schema(example = "Ada", min_length = 2)]
    pub first_name: String,

    #[validate(custom(function = "crate::validation::last_name_length"))]
    #[schema(example = "Lovelace", min_length = 2)]
    pub last_name: String,

    #[validate(custom(function = "crate::validation::email_format"))]
    #[schema(example = "ada@example.com")]
    pub email: String,

    /// Plaintext; hashed at creation and discarded
    #[validate(custom(function = "crate::validation::password_length"))]
    #[schema(example = "correct-horse", min_length = 7)]
    pub password: String,
}

impl std::fmt::Debug for CreateUserParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUserParams")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Payload for updating a user. The password cannot be changed here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateUserParams {
    #[validate(custom(function = "crate::validation::first_name_length"))]
    pub first_name: String,

    #[validate(custom(function = "crate::validation::last_name_length"))]
    pub last_name: String,

    #[validate(custom(function = "crate::validation::email_format"))]
    pub email: String,
}

/// Body returned after a successful delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeletedUser {
    pub id: String,
}
