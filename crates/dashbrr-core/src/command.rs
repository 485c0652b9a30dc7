//! The `Command` contract and the context every command runs with.
//!
//! A command is identified by its full name, one or more whitespace-separated
//! segments (`"version"`, `"service autobrr add"`). Commands are built once at
//! bootstrap and shared read-only for the rest of the process.

use std::time::Duration;

use async_trait::async_trait;

use crate::{OutputFormat, Result};

/// Default upper bound for a single collaborator call (health probe, lookup).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A named, executable unit exposing description, usage and execute.
#[async_trait]
pub trait Command: Send + Sync {
    /// Full command name, e.g. `"service radarr add"`.
    fn name(&self) -> &str;

    /// One-line description used in listings.
    fn description(&self) -> &str;

    /// Multi-line usage text, may embed examples.
    fn usage(&self) -> &str;

    /// Run the command with the arguments remaining after its name.
    async fn execute(&self, ctx: &CommandContext, args: &[String]) -> Result<()>;
}

/// Per-invocation context handed to every command.
///
/// Carries the output format requested on the command line and the deadline
/// collaborators are expected to honor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandContext {
    output: OutputFormat,
    timeout: Duration,
}

impl CommandContext {
    #[must_use]
    pub const fn new(output: OutputFormat, timeout: Duration) -> Self {
        Self { output, timeout }
    }

    #[must_use]
    pub const fn output(&self) -> OutputFormat {
        self.output
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Output format for a command, upgraded to JSON when `--json` is among its arguments.
    #[must_use]
    pub fn output_for(&self, args: &[String]) -> OutputFormat {
        if self.output.is_json() {
            OutputFormat::Json
        } else {
            OutputFormat::from_args(args)
        }
    }
}

impl Default for CommandContext {
    fn default() -> Self {
        Self::new(OutputFormat::Human, DEFAULT_TIMEOUT)
    }
}

/// Remove every occurrence of a boolean flag, reporting whether it was present.
pub fn take_flag(args: &[String], flag: &str) -> (bool, Vec<String>) {
    let (found, rest): (Vec<&String>, Vec<&String>) =
        args.iter().partition(|arg| arg.as_str() == flag);
    (!found.is_empty(), rest.into_iter().cloned().collect())
}

/// Remove an option with a value (`--name value` or `--name=value`).
///
/// Returns `None` for the value when the option is absent or has no value.
pub fn take_option(args: &[String], option: &str) -> (Option<String>, Vec<String>) {
    let prefix = format!("{option}=");
    let mut value = None;
    let mut rest = Vec::with_capacity(args.len());
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if arg == option {
            value = iter.next().cloned();
        } else if let Some(inline) = arg.strip_prefix(&prefix) {
            value = Some(inline.to_string());
        } else {
            rest.push(arg.clone());
        }
    }

    (value, rest)
}
