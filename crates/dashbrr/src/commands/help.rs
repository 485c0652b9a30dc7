//! `help [topic...]`

use async_trait::async_trait;
use dashbrr_core::{Command, CommandContext, RegistryHandle, Result};

const USAGE: &str = "Usage: dashbrr run help [command...]

Examples:
  dashbrr run help
  dashbrr run help service
  dashbrr run help service radarr
  dashbrr run help service radarr add
";

/// Prints contextual help from the registry it is registered in.
#[derive(Debug)]
pub struct HelpCommand {
    registry: RegistryHandle,
}

impl HelpCommand {
    pub const fn new(registry: RegistryHandle) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl Command for HelpCommand {
    fn name(&self) -> &str {
        "help"
    }

    fn description(&self) -> &str {
        "Show help for a command"
    }

    fn usage(&self) -> &str {
        USAGE
    }

    async fn execute(&self, _ctx: &CommandContext, args: &[String]) -> Result<()> {
        let registry = self.registry.get()?;
        print!("{}", registry.help(&args.join(" ")));
        Ok(())
    }
}
