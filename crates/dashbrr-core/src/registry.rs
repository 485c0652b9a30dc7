//! Command registry: the name → command map built at bootstrap.
//!
//! Names are full paths (`"service radarr add"`) stored flat. Registering a
//! name twice keeps the last command. After bootstrap the registry is wrapped
//! in an `Arc` and only read.

use std::{
    collections::HashMap,
    sync::{Arc, OnceLock, Weak},
};

use tracing::debug;

use crate::{help, Command, CommandContext, Error, Result};

/// Authoritative mapping from command name to command.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Arc<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `command.name()` to `command`, replacing any previous binding.
    pub fn register<C: Command + 'static>(&mut self, command: C) {
        self.register_shared(Arc::new(command));
    }

    /// Same as [`register`](Self::register) for an already shared command.
    pub fn register_shared(&mut self, command: Arc<dyn Command>) {
        let name = command.name().to_string();
        if self.commands.insert(name.clone(), command).is_some() {
            debug!(command = %name, "replaced existing command registration");
        }
    }

    /// Exact-match lookup by full name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.commands.get(name).cloned()
    }

    /// Resolve `name` and run the command with `args`.
    ///
    /// A multi-segment name is looked up joined by single spaces first, then
    /// as given. Names are not walked segment by segment: composite commands
    /// such as `service` resolve their own sub-paths.
    pub async fn execute(&self, ctx: &CommandContext, name: &str, args: &[String]) -> Result<()> {
        let segments: Vec<&str> = name.split_whitespace().collect();

        let command = (segments.len() > 1)
            .then(|| self.get(&segments.join(" ")))
            .flatten()
            .or_else(|| self.get(name))
            .ok_or_else(|| Error::unknown_command(name))?;

        debug!(command = command.name(), args = args.len(), "executing command");
        command.execute(ctx, args).await
    }

    /// All registered names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    /// Commands whose name starts with `prefix`, paired with the remainder of the name.
    pub fn with_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a Arc<dyn Command>)> + 'a {
        self.commands
            .iter()
            .filter_map(move |(name, command)| name.strip_prefix(prefix).map(|rest| (rest, command)))
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Top-level command table.
    pub fn list_commands(&self) -> String {
        help::render_command_list(self)
    }

    /// Contextual help for `name` (empty for the top-level table).
    pub fn help(&self, name: &str) -> String {
        help::render_help(self, name)
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("CommandRegistry")
            .field("commands", &names)
            .finish()
    }
}

/// Late-bound reference to the registry for commands that resolve sub-paths.
///
/// The `service` command is registered into the same registry it queries, so
/// it is constructed with an unbound handle that is bound once the registry
/// has been frozen into an `Arc`. The handle holds a `Weak` to avoid a cycle.
#[derive(Clone, Default)]
pub struct RegistryHandle {
    slot: Arc<OnceLock<Weak<CommandRegistry>>>,
}

impl RegistryHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the handle. Fails if it was already bound.
    pub fn bind(&self, registry: &Arc<CommandRegistry>) -> Result<()> {
        self.slot
            .set(Arc::downgrade(registry))
            .map_err(|_| Error::internal("registry handle is already bound"))
    }

    /// The bound registry.
    pub fn get(&self) -> Result<Arc<CommandRegistry>> {
        self.slot
            .get()
            .ok_or_else(|| Error::internal("registry handle used before bootstrap completed"))?
            .upgrade()
            .ok_or_else(|| Error::internal("registry was dropped"))
    }
}

impl std::fmt::Debug for RegistryHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryHandle")
            .field("bound", &self.slot.get().is_some())
            .finish()
    }
}
