//! Command implementations registered at bootstrap.

pub mod health;
pub mod help;
pub mod service;
pub mod service_actions;
pub mod user;
pub mod version;

pub use health::HealthCommand;
pub use help::HelpCommand;
pub use service::ServiceCommand;
pub use service_actions::{AddServiceCommand, ListServicesCommand, RemoveServiceCommand};
pub use user::UserCommand;
pub use version::VersionCommand;
