//! # rf-auth-simple
//!
//! Argon2-based implementation of `AuthProvider`.
//! Hashes are stored in PHC string format, so the salt and cost parameters
//! travel with each hash and verification needs no extra configuration.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use async_trait::async_trait;
use rf_core::error::{AppError, Result};
use rf_core::traits::AuthProvider;
use tracing::warn;

#[derive(Clone, Default)]
pub struct SimpleAuthProvider {
    hasher: Argon2<'static>,
}

impl SimpleAuthProvider {
    /// Argon2id with the crate's recommended default cost.
    pub fn new() -> Self {
        Self::default()
    }

    /// Argon2id with explicit cost parameters (e.g. cheaper ones for tests).
    pub fn with_params(params: Params) -> Self {
        Self {
            hasher: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }
}

#[async_trait]
impl AuthProvider for SimpleAuthProvider {
    /// Hashing is CPU-bound by design, so it runs on the blocking pool.
    async fn hash_password(&self, password: &str) -> Result<String> {
        let hasher = self.hasher.clone();
        let password = password.to_owned();

        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            hasher
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))
        })
        .await
        .map_err(|e| AppError::Internal(format!("password hashing task failed: {e}")))?
    }

    /// Verifies if a provided password matches a stored Argon2 hash.
    async fn verify_password(&self, password: &str, hash: &str) -> bool {
        let password = password.to_owned();
        let hash = hash.to_owned();

        let verified = tokio::task::spawn_blocking(move || {
            let parsed_hash = match PasswordHash::new(&hash) {
                Ok(p) => p,
                Err(e) => {
                    warn!("stored password hash is malformed: {e}");
                    return false;
                }
            };
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok()
        })
        .await;

        verified.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> SimpleAuthProvider {
        SimpleAuthProvider::with_params(Params::new(8, 1, 1, None).unwrap())
    }

    #[tokio::test]
    async fn hash_then_verify() {
        let auth = cheap();
        let hash = auth.hash_password("correct horse").await.unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("correct horse"));
        assert!(auth.verify_password("correct horse", &hash).await);
        assert!(!auth.verify_password("battery staple", &hash).await);
    }

    #[tokio::test]
    async fn same_password_gets_distinct_salts() {
        let auth = cheap();
        let a = auth.hash_password("password123").await.unwrap();
        let b = auth.hash_password("password123").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn malformed_hash_never_verifies() {
        let auth = cheap();
        assert!(!auth.verify_password("anything", "not-a-phc-string").await);
        assert!(!auth.verify_password("", "").await);
    }
}
