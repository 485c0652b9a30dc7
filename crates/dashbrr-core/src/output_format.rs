//! Human or JSON output selection for commands.

use serde::{Deserialize, Serialize};

/// Output format for command results.
///
/// Replaces a bare `json: bool`. Commands that support structured output
/// (`version`, `health`) pick it from a `--json` flag among their arguments.
///
/// # Examples
///
/// ```
/// use dashbrr_core::OutputFormat;
///
/// let format = OutputFormat::Json;
/// assert!(format.is_json());
/// assert!(!format.is_human());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON output format - structured, machine-readable
    Json,
    /// Human-readable output format - terminal-friendly
    #[default]
    Human,
}

impl OutputFormat {
    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }

    #[must_use]
    pub const fn is_human(&self) -> bool {
        matches!(self, Self::Human)
    }

    /// Convert a boolean `--json` flag to an `OutputFormat`.
    ///
    /// ```
    /// use dashbrr_core::OutputFormat;
    /// assert_eq!(OutputFormat::from_json_flag(true), OutputFormat::Json);
    /// assert_eq!(OutputFormat::from_json_flag(false), OutputFormat::Human);
    /// ```
    #[must_use]
    pub const fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Human
        }
    }

    /// Detect `--json` anywhere in an argument list.
    #[must_use]
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Self {
        Self::from_json_flag(args.iter().any(|arg| arg.as_ref() == "--json"))
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Human => write!(f, "human"),
        }
    }
}
