use async_trait::async_trait;

use crate::config;

/// A fixed, well-formed bcrypt hash compared against when no record matched
/// the login identifier, so the absent-record path costs roughly the same as
/// a real verification instead of returning early.
pub const ABSENT_RECORD_HASH: &str =
    "$2a$10$N9qo8uLOickgx2ZMRZoMyeIjZAgcfl7p92ldGxad68LJZdL17lhWy";

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("password hash error: {0}")]
    Hash(String),

    #[error("password verify error: {0}")]
    Verify(String),
}

/// Compares a plaintext password against a stored hash.
///
/// The auth service holds two of these: one for the regular-user store and
/// one for the administrative store, selected by principal tag.
#[async_trait]
pub trait PasswordVerifier: Send + Sync {
    async fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, PasswordError>;
}

/// Hashes a plaintext password for storage.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, plaintext: &str) -> Result<String, PasswordError>;
}

/// bcrypt-backed implementation of both capabilities.
#[derive(Debug, Clone)]
pub struct BcryptPassword {
    cost: u32,
}

impl BcryptPassword {
    pub fn new() -> Self {
        Self {
            cost: config::config().security.bcrypt_cost,
        }
    }

    /// Lower costs keep test suites fast; production uses the config default.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPassword {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PasswordVerifier for BcryptPassword {
    async fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, PasswordError> {
        bcrypt::verify(plaintext, hash).map_err(|e| PasswordError::Verify(e.to_string()))
    }
}

#[async_trait]
impl PasswordHasher for BcryptPassword {
    async fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| PasswordError::Hash(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_then_verify() {
        let bc = BcryptPassword::with_cost(4);
        let hash = bc.hash("hunter2").await.expect("hash");
        assert!(bc.verify("hunter2", &hash).await.expect("verify"));
        assert!(!bc.verify("hunter3", &hash).await.expect("verify"));
    }

    #[tokio::test]
    async fn absent_record_hash_is_well_formed() {
        // A malformed sentinel would turn the absent-record path into an
        // error instead of a normal mismatch.
        let bc = BcryptPassword::with_cost(4);
        let matched = bc
            .verify("anything", ABSENT_RECORD_HASH)
            .await
            .expect("verify");
        assert!(!matched);
    }
}
