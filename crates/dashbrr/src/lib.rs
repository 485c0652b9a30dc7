//! Dashbrr library interface
//!
//! The binary is a thin wrapper over [`cli::run_cli`]; everything it wires is
//! exposed here for integration tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod bootstrap;
pub mod cli;
pub mod commands;
pub mod database;
pub mod dispatch;
pub mod health_probe;
pub mod password;

pub use bootstrap::{build_registry, Collaborators};
pub use database::Database;
pub use dispatch::Dispatcher;
