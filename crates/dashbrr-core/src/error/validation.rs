//! Validation error types for arguments, URLs and configuration.
//!
//! These errors represent user input or configuration problems that can be
//! corrected by the user.

use std::fmt;

/// Validation errors represent incorrect user input or configuration.
#[derive(Debug, Clone)]
pub enum ValidationError {
    /// Wrong argument count or shape; carries the command usage
    MissingArguments { command: String, usage: String },
    /// URL is unparsable or not http(s)
    InvalidUrl { url: String, reason: String },
    /// URL already registered under another instance
    DuplicateService { url: String, instance_id: String },
    /// Username or email already taken
    DuplicateUser(String),
    /// Every instance number for the prefix is in use
    InstanceIdsExhausted(String),
    /// Invalid configuration provided
    InvalidConfig(String),
    /// Parse error when reading configuration or data
    ParseError(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingArguments { command, usage } => {
                write!(f, "Invalid arguments for '{command}'\n\n{usage}")
            }
            Self::InvalidUrl { url, reason } => write!(f, "Invalid URL '{url}': {reason}"),
            Self::DuplicateService { url, instance_id } => write!(
                f,
                "A service with URL '{url}' is already registered as {instance_id}"
            ),
            Self::DuplicateUser(msg) => write!(f, "User already exists: {msg}"),
            Self::InstanceIdsExhausted(prefix) => {
                write!(f, "No instance numbers left for '{prefix}<n>'")
            }
            Self::InvalidConfig(msg) => write!(f, "Invalid configuration: {msg}"),
            Self::ParseError(msg) => write!(f, "Parse error: {msg}"),
        }
    }
}

impl ValidationError {
    /// Get exit code for validation errors (always 1).
    pub const fn exit_code(&self) -> i32 {
        1
    }

    /// Machine-readable error code.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingArguments { .. } => "MISSING_ARGUMENTS",
            Self::InvalidUrl { .. } => "INVALID_URL",
            Self::DuplicateService { .. } => "DUPLICATE_SERVICE",
            Self::DuplicateUser(_) => "DUPLICATE_USER",
            Self::InstanceIdsExhausted(_) => "INSTANCE_IDS_EXHAUSTED",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::ParseError(_) => "PARSE_ERROR",
        }
    }
}
