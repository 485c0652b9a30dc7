//! Dispatch error types for command resolution.
//!
//! These errors are raised while turning a command line into a registered
//! command. Each variant that helps discovery carries the rendered help text.

use std::fmt;

/// Dispatch errors represent a command line that does not resolve to a command.
#[derive(Debug, Clone)]
pub enum DispatchError {
    /// No command was given
    NoCommandSpecified { listing: String },
    /// No registered command has this name
    UnknownCommand { name: String },
    /// Service type is not in the known table
    UnknownServiceType {
        service_type: String,
        listing: String,
    },
    /// A service type was given without an action
    NoActionSpecified { service_type: String, help: String },
    /// The action is not registered under the service type
    UnknownAction {
        service_type: String,
        action: String,
        help: String,
    },
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCommandSpecified { listing } => {
                write!(f, "No command specified\n\n{listing}")
            }
            Self::UnknownCommand { name } => write!(
                f,
                "Unknown command: '{name}'\nRun 'dashbrr run help' to list available commands"
            ),
            Self::UnknownServiceType {
                service_type,
                listing,
            } => write!(f, "Unknown service type: '{service_type}'\n\n{listing}"),
            Self::NoActionSpecified { service_type, help } => {
                write!(f, "No action specified for service type '{service_type}'\n\n{help}")
            }
            Self::UnknownAction {
                service_type,
                action,
                help,
            } => write!(
                f,
                "Unknown action '{action}' for service type '{service_type}'\n\n{help}"
            ),
        }
    }
}

impl DispatchError {
    /// Get exit code for dispatch errors (always 1).
    pub const fn exit_code(&self) -> i32 {
        1
    }

    /// Machine-readable error code.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NoCommandSpecified { .. } => "NO_COMMAND_SPECIFIED",
            Self::UnknownCommand { .. } => "UNKNOWN_COMMAND",
            Self::UnknownServiceType { .. } => "UNKNOWN_SERVICE_TYPE",
            Self::NoActionSpecified { .. } => "NO_ACTION_SPECIFIED",
            Self::UnknownAction { .. } => "UNKNOWN_ACTION",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_action_display() {
        let err = DispatchError::UnknownAction {
            service_type: "radarr".to_string(),
            action: "purge".to_string(),
            help: "Available actions for radarr:".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unknown action 'purge' for service type 'radarr'\n\nAvailable actions for radarr:"
        );
    }

    #[test]
    fn test_no_command_specified_includes_listing() {
        let err = DispatchError::NoCommandSpecified {
            listing: "Available commands:".to_string(),
        };
        assert!(err.to_string().starts_with("No command specified"));
        assert!(err.to_string().ends_with("Available commands:"));
    }

    #[test]
    fn test_dispatch_codes_are_distinct() {
        let codes = [
            DispatchError::NoCommandSpecified {
                listing: String::new(),
            }
            .code(),
            DispatchError::UnknownCommand {
                name: String::new(),
            }
            .code(),
            DispatchError::UnknownServiceType {
                service_type: String::new(),
                listing: String::new(),
            }
            .code(),
            DispatchError::NoActionSpecified {
                service_type: String::new(),
                help: String::new(),
            }
            .code(),
            DispatchError::UnknownAction {
                service_type: String::new(),
                action: String::new(),
                help: String::new(),
            }
            .code(),
        ];
        let unique: std::collections::HashSet<_> = codes.iter().collect();
        assert_eq!(unique.len(), codes.len());
    }
}
