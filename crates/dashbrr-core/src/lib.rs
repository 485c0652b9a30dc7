//! # Dashbrr Core
//!
//! Command registry, hierarchical dispatch and help engine for the Dashbrr CLI,
//! plus the narrow contracts the commands use to reach persistence and health probes.
//!
//! ## Laws (Compiler Enforced)
//!
//! - No `unwrap()` - returns `Result` instead
//! - No `expect()` - returns `Result` instead
//! - No `panic!()` - returns `Result` instead
//! - No `unsafe` - safe Rust only
//!
//! ## Error Handling
//!
//! All fallible operations return `Result<T, Error>`. Use:
//! - `?` operator for propagation
//! - `map`, `and_then` combinators for transformation
//! - `match` / `map_or` / `unwrap_or_else` for defaults

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod command;
pub mod config;
mod error;
pub mod help;
pub mod instance_id;
pub mod memory;
mod output_format;
pub mod ports;
pub mod registry;
pub mod service_type;

pub use command::{take_flag, take_option, Command, CommandContext};
pub use config::{load_config, Config};
pub use error::{CollaboratorError, DispatchError, Error, ValidationError};
pub use instance_id::{next_instance_id, InstanceId};
pub use output_format::OutputFormat;
pub use ports::{
    HealthProbe, HealthProbes, HealthReport, HealthStatus, NewUser, PasswordHasher,
    ServiceRecord, ServiceStore, User, UserStore,
};
pub use registry::{CommandRegistry, RegistryHandle};
pub use service_type::ServiceType;

/// Result type alias using the crate error.
pub type Result<T> = std::result::Result<T, Error>;
