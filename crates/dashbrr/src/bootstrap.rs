//! Two-phase construction of the command registry.
//!
//! Every command is registered into a mutable registry, the registry is frozen
//! into an `Arc`, and only then are the late-bound handles of `help` and
//! `service` pointed at it.

use std::sync::Arc;

use dashbrr_core::{
    CommandRegistry, Config, HealthProbes, PasswordHasher, RegistryHandle, Result, ServiceStore,
    ServiceType, UserStore,
};
use tracing::debug;

use crate::{
    commands::{
        AddServiceCommand, HealthCommand, HelpCommand, ListServicesCommand, RemoveServiceCommand,
        ServiceCommand, UserCommand, VersionCommand,
    },
    database::Database,
    health_probe::HttpProbes,
    password::Argon2Hasher,
};

/// Everything the commands talk to outside the process.
#[derive(Clone)]
pub struct Collaborators {
    pub services: Arc<dyn ServiceStore>,
    pub users: Arc<dyn UserStore>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub probes: Arc<dyn HealthProbes>,
}

impl Collaborators {
    /// Production wiring: SQLite stores, Argon2 hashing, HTTP probes.
    ///
    /// The database is opened on the first store call, so `help` and
    /// `version` run without one.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn open(config: &Config) -> Result<Self> {
        let database = Arc::new(Database::lazy(&config.database_path));
        let probes = HttpProbes::new(config.probe_timeout())?;

        Ok(Self {
            services: database.clone(),
            users: database,
            hasher: Arc::new(Argon2Hasher),
            probes: Arc::new(probes),
        })
    }
}

/// Register every command and freeze the registry.
///
/// # Errors
///
/// Returns error only if a registry handle was already bound, which would
/// mean the wiring below is broken.
pub fn build_registry(collaborators: &Collaborators) -> Result<Arc<CommandRegistry>> {
    let handle = RegistryHandle::new();
    let mut registry = CommandRegistry::new();

    registry.register(VersionCommand);
    registry.register(HealthCommand::new(
        Arc::clone(&collaborators.services),
        Arc::clone(&collaborators.probes),
    ));
    registry.register(HelpCommand::new(handle.clone()));
    registry.register(UserCommand::new(
        Arc::clone(&collaborators.users),
        Arc::clone(&collaborators.hasher),
    ));
    registry.register(ServiceCommand::new(handle.clone()));

    for service_type in ServiceType::all() {
        let store = &collaborators.services;
        registry.register(AddServiceCommand::new(service_type, Arc::clone(store)));
        registry.register(ListServicesCommand::new(service_type, Arc::clone(store)));
        registry.register(RemoveServiceCommand::new(service_type, Arc::clone(store)));
    }

    let registry = Arc::new(registry);
    handle.bind(&registry)?;

    debug!(commands = registry.len(), "command registry ready");
    Ok(registry)
}
