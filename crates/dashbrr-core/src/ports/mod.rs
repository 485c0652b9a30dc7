//! Contracts for the collaborators commands call.
//!
//! The dispatch core never talks to SQLite, HTTP or a password hasher
//! directly; commands hold these traits and the binary wires concrete
//! implementations in at bootstrap.

mod health;
mod service_store;
mod user_store;

pub use health::{HealthProbe, HealthProbes, HealthReport, HealthStatus};
pub use service_store::{ServiceRecord, ServiceStore};
pub use user_store::{NewUser, PasswordHasher, User, UserStore};
