//! # AppError
//!
//! Centralized error handling for the Rusty-Forum ecosystem.
//! Maps persistence and account failures to actionable error types.

use crate::models::Entity;
use thiserror::Error;

/// Boxed source error carried by infrastructure failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The primary error type for all rf-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// No row matches the given id or key.
    #[error("{entity} not found with key {key}")]
    NotFound { entity: Entity, key: String },

    /// A unique or referential constraint rejected the write.
    #[error("{entity} conflict: {detail}")]
    Conflict { entity: Entity, detail: String },

    /// Connection or transport failure while talking to the store.
    #[error("store unavailable while trying to {action} {entity}")]
    StoreUnavailable {
        entity: Entity,
        action: &'static str,
        #[source]
        source: BoxError,
    },

    /// Caller-supplied fields failed required/shape checks.
    #[error("validation error: {0}")]
    ValidationFailed(String),

    /// Login failed. Deliberately does not say whether the username or the password was wrong.
    #[error("incorrect credentials")]
    InvalidCredentials,

    /// Anything else (hashing failures, rendering, ...).
    #[error("internal service error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(entity: Entity, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

/// A specialized Result type for Rusty-Forum logic.
pub type Result<T> = std::result::Result<T, AppError>;
