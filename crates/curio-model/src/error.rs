//! Model-layer error types.

use thiserror::Error;

/// Errors raised by entity marshalling, lifecycle hooks, and hashing.
#[derive(Debug, Error)]
pub enum Error {
    /// Schema metadata or coercion error.
    #[error(transparent)]
    Schema(#[from] curio_schema::Error),

    /// The User login-method invariant was violated.
    #[error("account must have email and password, or at least one oauth link")]
    InvalidAccountState,

    /// Password hashing or parsing failed.
    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    /// JSON serialization failed.
    #[error("json serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
