//! The composite `service` command.
//!
//! `service <type> <action> [args...]` is resolved here rather than by the
//! registry: the first two arguments select the nested command registered as
//! `"service <type> <action>"`, which receives everything after them.

use async_trait::async_trait;
use dashbrr_core::{
    help, Command, CommandContext, CommandRegistry, Error, RegistryHandle, Result,
};
use tracing::debug;

const USAGE: &str = "Usage: dashbrr run service <type> <action> [arguments]

Examples:
  dashbrr run service radarr add http://localhost:7878 <api-key>
  dashbrr run service radarr list
  dashbrr run service general add https://example.com --name \"Status page\"
";

#[derive(Debug)]
pub struct ServiceCommand {
    registry: RegistryHandle,
}

impl ServiceCommand {
    pub const fn new(registry: RegistryHandle) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl Command for ServiceCommand {
    fn name(&self) -> &str {
        "service"
    }

    fn description(&self) -> &str {
        "Manage services"
    }

    fn usage(&self) -> &str {
        USAGE
    }

    async fn execute(&self, ctx: &CommandContext, args: &[String]) -> Result<()> {
        let registry = self.registry.get()?;

        match args {
            [] => Err(Error::missing_arguments(
                self.name(),
                help::render_service_types(),
            )),
            [service_type] => Err(Error::no_action_specified(
                service_type.as_str(),
                action_help(&registry, service_type)?,
            )),
            [service_type, action, rest @ ..] => {
                let name = format!("service {service_type} {action}");
                let Some(command) = registry.get(&name) else {
                    return Err(Error::unknown_action(
                        service_type.as_str(),
                        action.as_str(),
                        action_help(&registry, service_type)?,
                    ));
                };
                debug!(command = %name, "resolved service action");
                command.execute(ctx, rest).await
            }
        }
    }
}

/// Action listing for a type, or `UnknownServiceType` when nothing is registered under it.
///
/// This also applies to `service <type>` with no action: an unregistered type
/// reports `UnknownServiceType` with the type table instead of
/// `NoActionSpecified` with an empty listing.
fn action_help(registry: &CommandRegistry, service_type: &str) -> Result<String> {
    help::render_service_actions(registry, service_type)
        .ok_or_else(|| Error::unknown_service_type(service_type, help::render_service_types()))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use dashbrr_core::{DispatchError, ValidationError};

    use super::*;

    struct Recorder {
        name: &'static str,
        calls: Mutex<Vec<Vec<String>>>,
    }

    impl Recorder {
        fn new(name: &'static str) -> Arc<Self> {
            Arc::new(Self {
                name,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<Vec<String>> {
            self.calls.lock().map(|c| c.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl Command for Recorder {
        fn name(&self) -> &str {
            self.name
        }
        fn description(&self) -> &str {
            "recorded action"
        }
        fn usage(&self) -> &str {
            "Usage: recorded"
        }
        async fn execute(&self, _ctx: &CommandContext, args: &[String]) -> Result<()> {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(args.to_vec());
            }
            Ok(())
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    fn setup() -> Result<(Arc<CommandRegistry>, Arc<Recorder>)> {
        let handle = RegistryHandle::new();
        let add = Recorder::new("service autobrr add");

        let mut registry = CommandRegistry::new();
        registry.register(ServiceCommand::new(handle.clone()));
        registry.register_shared(add.clone());
        registry.register_shared(Recorder::new("service autobrr list"));

        let registry = Arc::new(registry);
        handle.bind(&registry)?;
        Ok((registry, add))
    }

    #[tokio::test]
    async fn test_forwards_remaining_arguments() -> Result<()> {
        let (registry, add) = setup()?;
        registry
            .execute(
                &CommandContext::default(),
                "service",
                &strings(&["autobrr", "add", "http://x", "key1"]),
            )
            .await?;

        assert_eq!(add.calls(), vec![strings(&["http://x", "key1"])]);
        Ok(())
    }

    #[tokio::test]
    async fn test_type_without_action_lists_actions() -> Result<()> {
        let (registry, add) = setup()?;
        let result = registry
            .execute(&CommandContext::default(), "service", &strings(&["autobrr"]))
            .await;

        let Err(Error::Dispatch(DispatchError::NoActionSpecified { service_type, help: listing })) = result
        else {
            return Err(Error::internal("expected NoActionSpecified"));
        };
        assert_eq!(service_type, "autobrr");
        assert!(listing.contains("Available actions for autobrr:"));
        assert!(listing.contains("  add         recorded action"));
        assert!(add.calls().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_action_embeds_listing() -> Result<()> {
        let (registry, _) = setup()?;
        let result = registry
            .execute(&CommandContext::default(), "service", &strings(&["autobrr", "purge"]))
            .await;

        assert!(matches!(
            result,
            Err(Error::Dispatch(DispatchError::UnknownAction { ref action, ref help, .. }))
                if action == "purge" && help.contains("list")
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_unregistered_type() -> Result<()> {
        let (registry, _) = setup()?;
        let result = registry
            .execute(&CommandContext::default(), "service", &strings(&["lidarr", "add"]))
            .await;

        assert!(matches!(
            result,
            Err(Error::Dispatch(DispatchError::UnknownServiceType { ref listing, .. }))
                if listing.contains("Available service types:")
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_unregistered_type_without_action() -> Result<()> {
        let (registry, _) = setup()?;
        let result = registry
            .execute(&CommandContext::default(), "service", &strings(&["lidarr"]))
            .await;

        assert!(matches!(
            result,
            Err(Error::Dispatch(DispatchError::UnknownServiceType { ref service_type, .. }))
                if service_type == "lidarr"
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_no_arguments_lists_service_types() -> Result<()> {
        let (registry, _) = setup()?;
        let result = registry
            .execute(&CommandContext::default(), "service", &[])
            .await;

        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::MissingArguments { ref usage, .. }))
                if usage.contains("Available service types:")
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_unbound_handle_is_internal_error() {
        let service = ServiceCommand::new(RegistryHandle::new());
        let result = service
            .execute(&CommandContext::default(), &strings(&["autobrr"]))
            .await;
        assert!(result.is_err_and(|e| e.code() == "INTERNAL_ERROR"));
    }
}
