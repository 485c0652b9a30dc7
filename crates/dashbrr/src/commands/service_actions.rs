//! `service <type> add|list|remove`, one instance of each per service type.

use std::{str::FromStr, sync::Arc};

use async_trait::async_trait;
use dashbrr_core::{
    instance_id::next_instance_number, take_flag, take_option, Command, CommandContext, Error,
    InstanceId, Result, ServiceRecord, ServiceStore, ServiceType,
};
use itertools::Itertools;
use reqwest::Url;
use serde::Serialize;
use tracing::info;

/// Service as printed by `add` and `list`; the api key is never echoed.
#[derive(Debug, Serialize)]
struct ServiceView<'a> {
    instance_id: &'a str,
    display_name: &'a str,
    url: &'a str,
    has_api_key: bool,
}

impl<'a> From<&'a ServiceRecord> for ServiceView<'a> {
    fn from(record: &'a ServiceRecord) -> Self {
        Self {
            instance_id: &record.instance_id,
            display_name: &record.display_name,
            url: &record.url,
            has_api_key: record.api_key.is_some(),
        }
    }
}

/// Name, description and usage shared by the three actions of one type.
#[derive(Debug)]
struct ActionText {
    name: String,
    description: String,
    usage: String,
}

/// Parse a service URL: http or https with a host. A trailing `/` is dropped so
/// `add` and `remove` agree on the stored form.
pub fn normalize_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|e| Error::invalid_url(raw, e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::invalid_url(raw, "scheme must be http or https"));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(Error::invalid_url(raw, "missing host"));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

pub struct AddServiceCommand {
    service_type: ServiceType,
    text: ActionText,
    store: Arc<dyn ServiceStore>,
}

impl AddServiceCommand {
    pub fn new(service_type: ServiceType, store: Arc<dyn ServiceStore>) -> Self {
        let key_arg = if service_type.requires_api_key() {
            "<api-key>"
        } else {
            "[api-key]"
        };
        let text = ActionText {
            name: format!("service {service_type} add"),
            description: format!("Add a {} instance", service_type.display_name()),
            usage: format!(
                "Usage: dashbrr run service {service_type} add <url> {key_arg} [--name <display name>]\n\n\
                 Examples:\n  \
                 dashbrr run service {service_type} add http://localhost:8080 {key_arg}\n  \
                 dashbrr run service {service_type} add https://{service_type}.example.com {key_arg} --name \"{} 4K\"\n",
                service_type.display_name()
            ),
        };
        Self {
            service_type,
            text,
            store,
        }
    }

    fn usage_error(&self) -> Error {
        Error::missing_arguments(&self.text.name, &self.text.usage)
    }
}

#[async_trait]
impl Command for AddServiceCommand {
    fn name(&self) -> &str {
        &self.text.name
    }

    fn description(&self) -> &str {
        &self.text.description
    }

    fn usage(&self) -> &str {
        &self.text.usage
    }

    async fn execute(&self, ctx: &CommandContext, args: &[String]) -> Result<()> {
        let output = ctx.output_for(args);
        let (_, args) = take_flag(args, "--json");
        let (display_name, args) = take_option(&args, "--name");

        let (url, api_key) = match args.as_slice() {
            [url] => (url, None),
            [url, key] => (url, Some(key.clone())),
            _ => return Err(self.usage_error()),
        };
        if api_key.is_none() && self.service_type.requires_api_key() {
            return Err(self.usage_error());
        }

        let url = normalize_url(url)?;
        if let Some(existing) = self.store.find_service_by_url(&url).await? {
            return Err(Error::duplicate_service(url, existing.instance_id));
        }

        // Read-then-insert without a lock: a concurrent add of the same type
        // can pick the same number and lose on the unique constraint.
        let existing = self.store.all_services().await?;
        let number = next_instance_number(
            &self.service_type.id_prefix(),
            existing.iter().map(|record| record.instance_id.as_str()),
        )?;

        let record = ServiceRecord {
            instance_id: InstanceId::new(self.service_type, number).to_string(),
            display_name: display_name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| self.service_type.display_name().to_string()),
            url,
            api_key,
            access_url: None,
        };
        self.store.create_service(&record).await?;

        info!(instance_id = %record.instance_id, url = %record.url, "service added");

        if output.is_json() {
            let view = ServiceView::from(&record);
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({ "success": true, "service": view }))?
            );
        } else {
            println!(
                "Added {} as {} ({})",
                record.display_name, record.instance_id, record.url
            );
        }
        Ok(())
    }
}

pub struct ListServicesCommand {
    service_type: ServiceType,
    text: ActionText,
    store: Arc<dyn ServiceStore>,
}

impl ListServicesCommand {
    pub fn new(service_type: ServiceType, store: Arc<dyn ServiceStore>) -> Self {
        let text = ActionText {
            name: format!("service {service_type} list"),
            description: format!("List {} instances", service_type.display_name()),
            usage: format!(
                "Usage: dashbrr run service {service_type} list [--json]\n\n\
                 Examples:\n  dashbrr run service {service_type} list\n"
            ),
        };
        Self {
            service_type,
            text,
            store,
        }
    }

    /// Records of this type, ordered by instance number.
    async fn records(&self) -> Result<Vec<ServiceRecord>> {
        let prefix = self.service_type.id_prefix();
        Ok(self
            .store
            .all_services()
            .await?
            .into_iter()
            .filter(|record| record.instance_id.starts_with(&prefix))
            .sorted_by_key(|record| {
                InstanceId::from_str(&record.instance_id).map_or(u64::MAX, |id| id.number())
            })
            .collect())
    }
}

#[async_trait]
impl Command for ListServicesCommand {
    fn name(&self) -> &str {
        &self.text.name
    }

    fn description(&self) -> &str {
        &self.text.description
    }

    fn usage(&self) -> &str {
        &self.text.usage
    }

    async fn execute(&self, ctx: &CommandContext, args: &[String]) -> Result<()> {
        let (_, rest) = take_flag(args, "--json");
        if !rest.is_empty() {
            return Err(Error::missing_arguments(&self.text.name, &self.text.usage));
        }

        let records = self.records().await?;

        if ctx.output_for(args).is_json() {
            let views: Vec<ServiceView<'_>> = records.iter().map(ServiceView::from).collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({ "success": true, "services": views }))?
            );
        } else if records.is_empty() {
            println!("No {} services registered", self.service_type.display_name());
        } else {
            for record in &records {
                println!(
                    "{:<14}{:<20}{}",
                    record.instance_id, record.display_name, record.url
                );
            }
        }
        Ok(())
    }
}

pub struct RemoveServiceCommand {
    service_type: ServiceType,
    text: ActionText,
    store: Arc<dyn ServiceStore>,
}

impl RemoveServiceCommand {
    pub fn new(service_type: ServiceType, store: Arc<dyn ServiceStore>) -> Self {
        let text = ActionText {
            name: format!("service {service_type} remove"),
            description: format!("Remove a {} instance", service_type.display_name()),
            usage: format!(
                "Usage: dashbrr run service {service_type} remove <url>\n\n\
                 Examples:\n  dashbrr run service {service_type} remove http://localhost:8080\n"
            ),
        };
        Self {
            service_type,
            text,
            store,
        }
    }
}

#[async_trait]
impl Command for RemoveServiceCommand {
    fn name(&self) -> &str {
        &self.text.name
    }

    fn description(&self) -> &str {
        &self.text.description
    }

    fn usage(&self) -> &str {
        &self.text.usage
    }

    async fn execute(&self, _ctx: &CommandContext, args: &[String]) -> Result<()> {
        let [url] = args else {
            return Err(Error::missing_arguments(&self.text.name, &self.text.usage));
        };
        let url = normalize_url(url)?;

        let not_found =
            || Error::not_found(format!("No {} service with URL '{url}'", self.service_type));

        let record = self
            .store
            .find_service_by_url(&url)
            .await?
            .filter(|record| record.service_type() == Some(self.service_type))
            .ok_or_else(not_found)?;

        if !self.store.delete_service(&record.instance_id).await? {
            return Err(not_found());
        }

        info!(instance_id = %record.instance_id, url = %record.url, "service removed");
        println!("Removed {} ({})", record.instance_id, record.url);
        Ok(())
    }
}
