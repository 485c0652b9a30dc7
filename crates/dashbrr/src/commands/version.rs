//! `version` - build version, human or JSON.

use async_trait::async_trait;
use dashbrr_core::{take_flag, Command, CommandContext, Error, Result};
use serde::Serialize;

const USAGE: &str = "Usage: dashbrr run version [--json]

Examples:
  dashbrr run version
  dashbrr run version --json
";

#[derive(Debug, Serialize)]
pub struct VersionOutput {
    pub success: bool,
    pub version: VersionInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionInfo {
    pub semver: String,
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub prerelease: Option<String>,
    /// Set when the build exported `GIT_COMMIT`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_commit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_date: Option<String>,
    pub target: String,
}

#[derive(Debug, Default)]
pub struct VersionCommand;

#[async_trait]
impl Command for VersionCommand {
    fn name(&self) -> &str {
        "version"
    }

    fn description(&self) -> &str {
        "Show version information"
    }

    fn usage(&self) -> &str {
        USAGE
    }

    async fn execute(&self, ctx: &CommandContext, args: &[String]) -> Result<()> {
        let (_, rest) = take_flag(args, "--json");
        if !rest.is_empty() {
            return Err(Error::missing_arguments(self.name(), USAGE));
        }

        let info = parse_version(env!("CARGO_PKG_VERSION"));
        if ctx.output_for(args).is_json() {
            let output = VersionOutput {
                success: true,
                version: info,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            print_human_readable(&info);
        }
        Ok(())
    }
}

/// Split `major.minor.patch[-pre]`; missing or malformed parts read as 0.
fn parse_version(semver: &str) -> VersionInfo {
    let (core, prerelease) = semver
        .split_once('-')
        .map_or((semver, None), |(core, pre)| (core, Some(pre.to_string())));

    let mut parts = core.split('.').map(|part| part.parse::<u32>().unwrap_or(0));
    let major = parts.next().unwrap_or(0);
    let minor = parts.next().unwrap_or(0);
    let patch = parts.next().unwrap_or(0);

    VersionInfo {
        semver: semver.to_string(),
        major,
        minor,
        patch,
        prerelease,
        git_commit: option_env!("GIT_COMMIT").map(String::from),
        build_date: option_env!("BUILD_DATE").map(String::from),
        target: format!("{}-{}", std::env::consts::ARCH, std::env::consts::OS),
    }
}

fn print_human_readable(info: &VersionInfo) {
    println!("dashbrr {}", info.semver);
    if let Some(ref commit) = info.git_commit {
        println!("git: {commit}");
    }
    if let Some(ref date) = info.build_date {
        println!("built: {date}");
    }
    println!("target: {}", info.target);
}
