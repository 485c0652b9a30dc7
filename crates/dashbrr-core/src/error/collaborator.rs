//! Collaborator error types for persistence, probes, hashing and IO.
//!
//! These wrap failures of the external collaborators the commands call.
//! The underlying message is surfaced verbatim.

use std::fmt;

/// Collaborator errors represent failures outside the dispatch core.
#[derive(Debug, Clone)]
pub enum CollaboratorError {
    /// Database operation failed
    Database(String),
    /// Health probe could not run
    HealthProbe(String),
    /// Password hashing or verification failed
    PasswordHash(String),
    /// IO operation failed
    Io(String),
    /// Resource not found
    NotFound(String),
    /// Internal wiring is broken (e.g. registry handle never bound)
    Internal(String),
}

impl fmt::Display for CollaboratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Database(msg) => write!(f, "Database error: {msg}"),
            Self::HealthProbe(msg) => write!(f, "Health check error: {msg}"),
            Self::PasswordHash(msg) => write!(f, "Password hashing error: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl CollaboratorError {
    /// Get exit code for collaborator errors.
    /// - Not found: 3
    /// - Everything else: 2
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound(_) => 3,
            _ => 2,
        }
    }

    /// Machine-readable error code.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Database(_) => "DATABASE_ERROR",
            Self::HealthProbe(_) => "HEALTH_PROBE_ERROR",
            Self::PasswordHash(_) => "PASSWORD_HASH_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
