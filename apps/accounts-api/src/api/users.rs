//! Wires the users domain to HTTP routes.

use axum::Router;
use domain_users::{MongoUserRepository, PasswordHasher, UserService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoUserRepository::new(state.db.clone());
    let hasher = PasswordHasher::from(state.config.hashing);

    handlers::router(UserService::new(repository, hasher))
}
