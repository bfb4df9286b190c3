//! Users Domain
//!
//! Account records stored in MongoDB: field validation, bcrypt password hashing and CRUD.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation before every mutation, blocking-thread hashing
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB and in-memory implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entity, payloads, factory, validation, hashing
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{handlers, MongoUserRepository, PasswordHasher, UserService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let repository = MongoUserRepository::new(client.database("accounts"));
//! let service = UserService::new(repository, PasswordHasher::default());
//!
//! let router = axum::Router::new().nest("/v1/user", handlers::router(service));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod factory;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod password;
pub mod repository;
pub mod service;
pub mod validation;

// Re-export commonly used types
pub use error::{UserError, UserResult};
pub use factory::new_user_from_params;
pub use handlers::ApiDoc;
pub use models::{CreateUserParams, DeletedUser, UpdateUserParams, User, UserResponse};
pub use mongodb::MongoUserRepository;
pub use password::{HashingConfig, PasswordHasher};
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
pub use validation::{ValidationErrors, Violation, ViolationKind, validate_create, validate_update};
