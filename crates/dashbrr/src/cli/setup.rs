//! Setup routines run before dispatch: early flag detection and logging.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Flags that change how errors are reported, read before clap runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SetupConfig {
    pub json_mode: bool,
}

/// Detect `--json` anywhere on the command line.
pub fn parse_early_flags() -> SetupConfig {
    parse_flags(std::env::args())
}

fn parse_flags<I: IntoIterator<Item = String>>(args: I) -> SetupConfig {
    SetupConfig {
        json_mode: args.into_iter().any(|arg| arg == "--json"),
    }
}

/// Filter from `RUST_LOG`, else `default_level`, else `warn`.
fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the stderr `tracing` subscriber.
///
/// # Errors
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(default_level: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_flag_detected_anywhere() {
        let args = ["dashbrr", "run", "health", "--json"].map(String::from);
        assert!(parse_flags(args).json_mode);

        let args = ["dashbrr", "run", "health"].map(String::from);
        assert!(!parse_flags(args).json_mode);
    }

    #[test]
    fn test_invalid_level_falls_back() {
        let filter = env_filter("not a level [");
        assert!(!filter.to_string().is_empty());
    }
}
