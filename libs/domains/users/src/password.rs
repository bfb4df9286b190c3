//! bcrypt password hashing with a configurable work factor.

use core_config::{ConfigError, FromEnv, env_parse_or};

use crate::error::{UserError, UserResult};

/// Work factor used when nothing else is configured.
pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;
/// Lowest cost bcrypt accepts.
pub const MIN_COST: u32 = 4;
/// Highest cost bcrypt accepts.
pub const MAX_COST: u32 = 31;

/// Hashes passwords with bcrypt at a fixed cost. Each hash embeds its own salt.
///
/// bcrypt is CPU-bound; call it from a blocking thread in async code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// A cost outside `MIN_COST..=MAX_COST` is accepted here and fails on first use.
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn hash(&self, password: &str) -> UserResult<String> {
        bcrypt::hash(password, self.cost).map_err(|e| UserError::PasswordHash(e.to_string()))
    }

    /// Check `password` against a stored hash.
    pub fn verify(&self, password: &str, hash: &str) -> UserResult<bool> {
        bcrypt::verify(password, hash).map_err(|e| UserError::PasswordHash(e.to_string()))
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

impl From<HashingConfig> for PasswordHasher {
    fn from(config: HashingConfig) -> Self {
        Self::new(config.bcrypt_cost)
    }
}

/// Password hashing settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingConfig {
    pub bcrypt_cost: u32,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: DEFAULT_COST,
        }
    }
}

impl FromEnv for HashingConfig {
    /// - BCRYPT_COST: defaults to 12, must be within 4..=31
    fn from_env() -> Result<Self, ConfigError> {
        let bcrypt_cost = env_parse_or("BCRYPT_COST", DEFAULT_COST)?;
        if !(MIN_COST..=MAX_COST).contains(&bcrypt_cost) {
            return Err(ConfigError::ParseError {
                key: "BCRYPT_COST".to_string(),
                details: format!(
                    "cost {} is outside the range {}..={}",
                    bcrypt_cost, MIN_COST, MAX_COST
                ),
            });
        }
        Ok(Self { bcrypt_cost })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cost_is_12() {
        assert_eq!(PasswordHasher::default().cost(), 12);
        assert_eq!(HashingConfig::default().bcrypt_cost, 12);
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new(MIN_COST);
        let hash = hasher.hash("longpass").unwrap();

        assert_ne!(hash, "longpass");
        assert!(hash.starts_with("$2"));
        assert!(hasher.verify("longpass", &hash).unwrap());
        assert!(!hasher.verify("wrongpass", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = PasswordHasher::new(MIN_COST);
        let first = hasher.hash("longpass").unwrap();
        let second = hasher.hash("longpass").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_hash_embeds_cost() {
        let hash = PasswordHasher::new(5).hash("longpass").unwrap();
        assert_eq!(&hash[4..6], "05");
    }

    #[test]
    fn test_out_of_range_cost_fails_on_hash() {
        let err = PasswordHasher::new(MIN_COST - 1).hash("longpass").unwrap_err();
        assert!(matches!(err, UserError::PasswordHash(_)));
    }

    #[test]
    fn test_verify_malformed_hash_is_error() {
        let err = PasswordHasher::default()
            .verify("longpass", "not-a-hash")
            .unwrap_err();
        assert!(matches!(err, UserError::PasswordHash(_)));
    }

    #[test]
    fn test_hashing_config_from_env() {
        temp_env::with_var("BCRYPT_COST", Some("10"), || {
            let config = HashingConfig::from_env().unwrap();
            assert_eq!(config.bcrypt_cost, 10);
            assert_eq!(PasswordHasher::from(config).cost(), 10);
        });

        temp_env::with_var("BCRYPT_COST", None::<&str>, || {
            assert_eq!(HashingConfig::from_env().unwrap().bcrypt_cost, 12);
        });
    }

    #[test]
    fn test_hashing_config_rejects_bad_cost() {
        temp_env::with_var("BCRYPT_COST", Some("3"), || {
            let err = HashingConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("BCRYPT_COST"));
        });

        temp_env::with_var("BCRYPT_COST", Some("32"), || {
            assert!(HashingConfig::from_env().is_err());
        });

        temp_env::with_var("BCRYPT_COST", Some("twelve"), || {
            assert!(HashingConfig::from_env().is_err());
        });
    }
}
