//! bcrypt-backed credential store.

use sg_shared::config::PasswordConfig;

use crate::errors::{DomainError, DomainResult};

/// Hashes and verifies passwords with bcrypt.
///
/// The salt is randomized per call, so hashing the same password twice
/// yields different hashes; only `verify` can relate a password to a hash.
#[derive(Debug, Clone)]
pub struct PasswordService {
    cost: u32,
}

impl PasswordService {
    /// Create a service with the configured cost factor
    pub fn new(config: PasswordConfig) -> Self {
        Self {
            cost: config.bcrypt_cost,
        }
    }

    /// Create a service with an explicit cost factor
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a password. The input is never logged or retained.
    pub fn hash(&self, password: &str) -> DomainResult<String> {
        bcrypt::hash(password, self.cost).map_err(|e| DomainError::Internal {
            message: format!("Failed to hash password: {}", e),
        })
    }

    /// Check a password against a stored hash.
    ///
    /// A malformed or truncated hash verifies as false rather than erroring;
    /// the caller cannot distinguish it from a wrong password.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        bcrypt::verify(password, hash).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // bcrypt's minimum cost keeps the test suite fast
    fn service() -> PasswordService {
        PasswordService::with_cost(4)
    }

    #[test]
    fn hash_then_verify_round_trips() {
        let service = service();
        let hash = service.hash("Passw0rd1").unwrap();

        assert!(service.verify("Passw0rd1", &hash));
        assert!(!service.verify("Passw0rd2", &hash));
    }

    #[test]
    fn salt_is_randomized_per_call() {
        let service = service();
        let first = service.hash("Passw0rd1").unwrap();
        let second = service.hash("Passw0rd1").unwrap();

        assert_ne!(first, second);
        assert!(service.verify("Passw0rd1", &first));
        assert!(service.verify("Passw0rd1", &second));
    }

    #[test]
    fn malformed_hash_verifies_false() {
        let service = service();
        assert!(!service.verify("Passw0rd1", "not-a-bcrypt-hash"));
        assert!(!service.verify("Passw0rd1", ""));
    }
}
