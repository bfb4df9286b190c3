//! Application state shared by the route modules.

use mongodb::{Client, Database};

/// Shared application state. Cloning is cheap; the client shares one connection pool.
#[derive(Clone)]
pub struct AppState {
    /// Configuration loaded from environment variables
    pub config: crate::config::Config,
    pub mongo_client: Client,
    /// Database holding the `users` collection
    pub db: Database,
}
