use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};

use database::mongodb::MongoConfig;
use domain_users::HashingConfig;

pub use core_config::Environment;

/// Application configuration, composed from the shared config components
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub hashing: HashingConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?.with_app_name(env!("CARGO_PKG_NAME"));
        let server = ServerConfig::from_env()?;
        let hashing = HashingConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            hashing,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("MONGODB_DATABASE", None),
                ("PORT", Some("5000")),
                ("BCRYPT_COST", Some("10")),
                ("APP_ENV", Some("production")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.mongodb.database(), "accounts");
                assert_eq!(config.mongodb.app_name.as_deref(), Some("accounts_api"));
                assert_eq!(config.server.port, 5000);
                assert_eq!(config.hashing.bcrypt_cost, 10);
                assert!(config.environment.is_production());
                assert_eq!(config.app.name, "accounts_api");
            },
        );
    }

    #[test]
    fn test_config_requires_mongodb_url() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", None::<&str>),
                ("MONGO_URL", None),
                ("MONGODB_URI", None),
            ],
            || {
                assert!(Config::from_env().is_err());
            },
        );
    }

    #[test]
    fn test_config_rejects_bad_bcrypt_cost() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("BCRYPT_COST", Some("40")),
            ],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(err.to_string().contains("BCRYPT_COST"));
            },
        );
    }
}
