//! Help text rendered from registry contents and the service-type table.

use itertools::Itertools;

use crate::{Command, CommandRegistry, ServiceType};

/// Width of the name column in every table.
pub const NAME_WIDTH: usize = 12;

const COMMANDS_HEADER: &str = "Usage: dashbrr run <command> [arguments]\n\nAvailable commands:\n";
const COMMANDS_FOOTER: &str =
    "\nUse \"dashbrr run help <command>\" for more information about a command.\n";

/// Top-level table: single-segment names only, sorted, with descriptions.
pub fn render_command_list(registry: &CommandRegistry) -> String {
    let rows = registry
        .names()
        .filter(|name| !name.contains(char::is_whitespace))
        .sorted_unstable()
        .filter_map(|name| registry.get(name))
        .map(|command| row(command.name(), command.description()))
        .collect::<String>();

    format!("{COMMANDS_HEADER}{rows}{COMMANDS_FOOTER}")
}

/// Known service types from the static table, regardless of registration.
pub fn render_service_types() -> String {
    let rows = ServiceType::all()
        .map(|service_type| row(service_type.as_ref(), service_type.display_name()))
        .collect::<String>();

    format!(
        "Usage: dashbrr run service <type> <action> [arguments]\n\n\
         Available service types:\n{rows}\n\
         Use \"dashbrr run help service <type>\" to list the actions for a service type.\n"
    )
}

/// Actions registered under `service <type>`, or `None` when there are none.
pub fn render_service_actions(registry: &CommandRegistry, service_type: &str) -> Option<String> {
    let prefix = format!("service {service_type} ");
    let rows = registry
        .with_prefix(&prefix)
        .sorted_unstable_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(action, command)| row(action, command.description()))
        .collect::<Vec<_>>();

    if rows.is_empty() {
        return None;
    }

    Some(format!(
        "Usage: dashbrr run service {service_type} <action> [arguments]\n\n\
         Available actions for {service_type}:\n{}\n\
         Use \"dashbrr run help service {service_type} <action>\" for details about an action.\n",
        rows.concat()
    ))
}

/// Message for a service type with no registered actions.
pub fn render_unknown_service_type(service_type: &str) -> String {
    format!(
        "Unknown service type: {service_type}\n\n\
         Run \"dashbrr run help service\" to list the available service types.\n"
    )
}

/// Description followed by usage for a single command.
pub fn render_command_detail(command: &dyn Command) -> String {
    format!("{}\n\n{}\n", command.description(), command.usage().trim_end())
}

/// Contextual help for `name`.
///
/// - `""` is the top-level table
/// - `"service"` is the service-type table
/// - `"service <type>"` lists that type's actions
/// - anything else is an exact lookup rendering description and usage
pub fn render_help(registry: &CommandRegistry, name: &str) -> String {
    let segments: Vec<&str> = name.split_whitespace().collect();

    match segments.as_slice() {
        [] => render_command_list(registry),
        ["service"] => render_service_types(),
        ["service", service_type] => render_service_actions(registry, service_type)
            .unwrap_or_else(|| render_unknown_service_type(service_type)),
        _ => render_exact(registry, &segments.join(" ")),
    }
}

fn render_exact(registry: &CommandRegistry, name: &str) -> String {
    registry.get(name).map_or_else(
        || {
            let mut out = format!("Unknown command: {name}\n\n");
            out.push_str(&render_command_list(registry));
            out
        },
        |command| render_command_detail(command.as_ref()),
    )
}

fn row(name: &str, description: &str) -> String {
    format!("  {name:<NAME_WIDTH$}{description}\n")
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::{CommandContext, Result};

    struct Stub {
        name: &'static str,
        description: &'static str,
    }

    #[async_trait]
    impl Command for Stub {
        fn name(&self) -> &str {
            self.name
        }
        fn description(&self) -> &str {
            self.description
        }
        fn usage(&self) -> &str {
            "Usage: dashbrr run stub\n\nExamples:\n  dashbrr run stub\n"
        }
        async fn execute(&self, _ctx: &CommandContext, _args: &[String]) -> Result<()> {
            Ok(())
        }
    }

    fn registry_with(names: &[(&'static str, &'static str)]) -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        for &(name, description) in names {
            registry.register(Stub { name, description });
        }
        registry
    }

    fn sample() -> CommandRegistry {
        registry_with(&[
            ("version", "Show version information"),
            ("health", "Check system and service health"),
            ("service", "Manage services"),
            ("service autobrr remove", "Remove an autobrr service"),
            ("service autobrr add", "Add an autobrr service"),
            ("service autobrr list", "List autobrr services"),
            ("service radarr add", "Add a radarr service"),
        ])
    }

    #[test]
    fn test_command_list_is_top_level_sorted() {
        let listing = render_command_list(&sample());

        let health = listing.find("  health");
        let service = listing.find("  service");
        let version = listing.find("  version");
        assert!(health < service && service < version);
        assert!(!listing.contains("autobrr"));
        assert!(listing.contains("  health      Check system and service health\n"));
        assert!(listing.starts_with(COMMANDS_HEADER));
        assert!(listing.ends_with(COMMANDS_FOOTER));
    }

    #[test]
    fn test_name_column_is_padded_to_twelve() {
        let listing = render_command_list(&registry_with(&[("user", "Manage users")]));
        assert!(listing.contains("  user        Manage users\n"));
    }

    #[test]
    fn test_empty_help_equals_command_list() {
        let registry = sample();
        assert_eq!(render_help(&registry, ""), render_command_list(&registry));
        assert_eq!(registry.help(""), registry.list_commands());
    }

    #[test]
    fn test_service_help_is_static_table() {
        let empty = CommandRegistry::new();
        let listing = render_help(&empty, "service");
        assert_eq!(listing, render_service_types());
        assert_eq!(render_help(&sample(), "service"), listing);
        for service_type in ServiceType::all() {
            assert!(listing.contains(&service_type.to_string()));
        }
    }

    #[test]
    fn test_service_type_actions_sorted() {
        let help = render_help(&sample(), "service autobrr");
        let add = help.find("  add ");
        let list = help.find("  list ");
        let remove = help.find("  remove ");
        assert!(add.is_some() && add < list && list < remove);
        assert!(help.contains("Add an autobrr service"));
        assert!(!help.contains("Add a radarr service"));
    }

    #[test]
    fn test_unregistered_service_type() {
        let help = render_help(&sample(), "service sonarr");
        assert!(help.contains("Unknown service type: sonarr"));
        assert!(help.contains("dashbrr run help service"));
    }

    #[test]
    fn test_service_action_detail() {
        let help = render_help(&sample(), "service autobrr add");
        assert!(help.starts_with("Add an autobrr service\n\n"));
        assert!(help.contains("Examples:"));
    }

    #[test]
    fn test_service_action_miss_falls_through_to_unknown() {
        let help = render_help(&sample(), "service autobrr purge");
        assert!(help.starts_with("Unknown command: service autobrr purge"));
        assert!(help.contains("Available commands:"));
    }

    #[test]
    fn test_generic_detail_and_miss() {
        let registry = sample();
        assert!(render_help(&registry, "version").starts_with("Show version information"));

        let miss = render_help(&registry, "frobnicate");
        assert!(miss.starts_with("Unknown command: frobnicate"));
        assert!(miss.ends_with(&render_command_list(&registry)));
    }
}
