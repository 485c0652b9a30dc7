//! Error types for Dashbrr with categorization:
//!
//! - **Dispatch errors**: command resolution failures (exit code 1)
//! - **Validation errors**: bad arguments, URLs, duplicates, configuration (exit code 1)
//! - **Collaborator errors**: database, health probe, hashing, IO (exit code 2 or 3)
//!
//! Dispatch and validation errors carry the help text the user needs for the
//! next attempt, so their `Display` output is self-contained.

pub mod collaborator;
pub mod dispatch;
pub mod validation;

pub use collaborator::CollaboratorError;
pub use dispatch::DispatchError;
use std::fmt;
pub use validation::ValidationError;

/// Top-level error type that can represent any error in the system.
#[derive(Debug, Clone)]
pub enum Error {
    /// Command resolution failed
    Dispatch(DispatchError),
    /// User input or configuration was rejected
    Validation(ValidationError),
    /// An external collaborator (database, probe, hasher) failed
    Collaborator(CollaboratorError),
}

// Convenience constructors
impl Error {
    /// No command was given on the command line.
    pub fn no_command_specified(listing: impl Into<String>) -> Self {
        Self::Dispatch(DispatchError::NoCommandSpecified {
            listing: listing.into(),
        })
    }

    /// No registered command matches the requested name.
    pub fn unknown_command(name: impl Into<String>) -> Self {
        Self::Dispatch(DispatchError::UnknownCommand { name: name.into() })
    }

    /// The requested service type is not known.
    pub fn unknown_service_type(service_type: impl Into<String>, listing: impl Into<String>) -> Self {
        Self::Dispatch(DispatchError::UnknownServiceType {
            service_type: service_type.into(),
            listing: listing.into(),
        })
    }

    /// A service type was given without an action.
    pub fn no_action_specified(service_type: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Dispatch(DispatchError::NoActionSpecified {
            service_type: service_type.into(),
            help: help.into(),
        })
    }

    /// The action is not registered for the service type.
    pub fn unknown_action(
        service_type: impl Into<String>,
        action: impl Into<String>,
        help: impl Into<String>,
    ) -> Self {
        Self::Dispatch(DispatchError::UnknownAction {
            service_type: service_type.into(),
            action: action.into(),
            help: help.into(),
        })
    }

    /// Wrong argument count or shape for a command.
    pub fn missing_arguments(command: impl Into<String>, usage: impl Into<String>) -> Self {
        Self::Validation(ValidationError::MissingArguments {
            command: command.into(),
            usage: usage.into(),
        })
    }

    /// URL could not be parsed or uses an unsupported scheme.
    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation(ValidationError::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        })
    }

    /// A service with the same URL is already registered.
    pub fn duplicate_service(url: impl Into<String>, instance_id: impl Into<String>) -> Self {
        Self::Validation(ValidationError::DuplicateService {
            url: url.into(),
            instance_id: instance_id.into(),
        })
    }

    /// A user with the same username or email already exists.
    pub fn duplicate_user(msg: impl Into<String>) -> Self {
        Self::Validation(ValidationError::DuplicateUser(msg.into()))
    }

    /// No unused instance number remains for `prefix`.
    pub fn instance_ids_exhausted(prefix: impl Into<String>) -> Self {
        Self::Validation(ValidationError::InstanceIdsExhausted(prefix.into()))
    }

    /// Create a validation error from an invalid config.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::Validation(ValidationError::InvalidConfig(msg.into()))
    }

    /// Create a validation error from a parse error.
    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::Validation(ValidationError::ParseError(msg.into()))
    }

    /// Create a collaborator error from a database failure.
    pub fn database_error(msg: impl Into<String>) -> Self {
        Self::Collaborator(CollaboratorError::Database(msg.into()))
    }

    /// Create a collaborator error from a health probe failure.
    pub fn probe_error(msg: impl Into<String>) -> Self {
        Self::Collaborator(CollaboratorError::HealthProbe(msg.into()))
    }

    /// Create a collaborator error from a password hashing failure.
    pub fn hash_error(msg: impl Into<String>) -> Self {
        Self::Collaborator(CollaboratorError::PasswordHash(msg.into()))
    }

    /// Create a collaborator error from an IO error.
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::Collaborator(CollaboratorError::Io(msg.into()))
    }

    /// Create a collaborator error for a missing resource.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::Collaborator(CollaboratorError::NotFound(msg.into()))
    }

    /// Create a collaborator error for broken internal wiring.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Collaborator(CollaboratorError::Internal(msg.into()))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dispatch(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Collaborator(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Returns the appropriate exit code for this error type.
    ///
    /// Exit code scheme:
    /// - 1: User error (dispatch, validation, bad configuration)
    /// - 2: Collaborator error (database, probe, hashing, IO)
    /// - 3: Not found (service or user missing)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Dispatch(err) => err.exit_code(),
            Self::Validation(err) => err.exit_code(),
            Self::Collaborator(err) => err.exit_code(),
        }
    }

    /// Stable machine-readable code for JSON error output.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Dispatch(err) => err.code(),
            Self::Validation(err) => err.code(),
            Self::Collaborator(err) => err.code(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::io_error(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::parse_error(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::parse_error(format!("Failed to parse config: {err}"))
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Self::database_error(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_command_points_at_help() {
        let err = Error::unknown_command("frobnicate");
        let msg = err.to_string();
        assert!(msg.contains("frobnicate"));
        assert!(msg.contains("help"));
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.code(), "UNKNOWN_COMMAND");
    }

    #[test]
    fn test_no_action_specified_embeds_help() {
        let err = Error::no_action_specified("autobrr", "Available actions for autobrr:\n  add");
        let msg = err.to_string();
        assert!(msg.contains("autobrr"));
        assert!(msg.contains("Available actions for autobrr"));
    }

    #[test]
    fn test_missing_arguments_embeds_usage() {
        let err = Error::missing_arguments("user create", "Usage: dashbrr run user create <username>");
        assert!(err.to_string().contains("Usage: dashbrr run user create"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_collaborator_exit_codes() {
        assert_eq!(Error::database_error("locked").exit_code(), 2);
        assert_eq!(Error::probe_error("timeout").exit_code(), 2);
        assert_eq!(Error::not_found("radarr-9").exit_code(), 3);
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io.into();
        assert!(matches!(err, Error::Collaborator(CollaboratorError::Io(_))));
    }

    #[test]
    fn test_toml_error_conversion() {
        let parsed: std::result::Result<toml::Value, _> = toml::from_str("not = [valid");
        let Err(toml_err) = parsed else {
            panic!("expected TOML parse failure");
        };
        let err: Error = toml_err.into();
        assert!(err.to_string().contains("Failed to parse config"));
    }
}
