//! Turns the arguments after `run` into a registry call.

use std::sync::Arc;

use dashbrr_core::{CommandContext, CommandRegistry, Error, Result};

/// The first argument names the command; the rest are its arguments.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<CommandRegistry>,
    ctx: CommandContext,
}

impl Dispatcher {
    pub fn new(registry: Arc<CommandRegistry>, ctx: CommandContext) -> Self {
        Self { registry, ctx }
    }

    /// # Errors
    ///
    /// `NoCommandSpecified` (carrying the command listing) for an empty list,
    /// otherwise whatever resolution or the command returns.
    pub async fn dispatch(&self, args: &[String]) -> Result<()> {
        let Some((name, rest)) = args.split_first() else {
            return Err(Error::no_command_specified(self.registry.list_commands()));
        };
        self.registry.execute(&self.ctx, name, rest).await
    }
}
