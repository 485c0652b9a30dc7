//! `health` - database reachability plus one probe per registered service.
//!
//! Probes run one after another, each bounded by the context timeout. A probe
//! that errors or times out is reported, not propagated; only an unreachable
//! database fails the command. In JSON mode that failure is reported by the
//! error envelope alone.

use std::{str::FromStr, sync::Arc};

use async_trait::async_trait;
use dashbrr_core::{
    take_flag, Command, CommandContext, Error, HealthProbes, HealthReport, HealthStatus,
    InstanceId, Result, ServiceRecord, ServiceStore,
};
use itertools::Itertools;
use serde::Serialize;
use tracing::{debug, warn};

const USAGE: &str = "Usage: dashbrr run health [--json]

Examples:
  dashbrr run health
  dashbrr run health --json
";

#[derive(Debug, Serialize)]
pub struct HealthOutput {
    pub success: bool,
    pub system: SystemHealth,
    pub services: Vec<ServiceHealth>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemHealth {
    pub database: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_error: Option<String>,
    pub service_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceHealth {
    pub instance_id: String,
    pub display_name: String,
    pub url: String,
    #[serde(flatten)]
    pub report: HealthReport,
}

pub struct HealthCommand {
    services: Arc<dyn ServiceStore>,
    probes: Arc<dyn HealthProbes>,
}

impl HealthCommand {
    pub fn new(services: Arc<dyn ServiceStore>, probes: Arc<dyn HealthProbes>) -> Self {
        Self { services, probes }
    }

    async fn probe(&self, ctx: &CommandContext, record: &ServiceRecord) -> HealthReport {
        let Some(service_type) = record.service_type() else {
            return HealthReport::new(HealthStatus::Unknown, "Unrecognized service type");
        };

        let probe = self.probes.probe_for(service_type);
        let check = probe.check_health(&record.url, record.api_key.as_deref());

        match tokio::time::timeout(ctx.timeout(), check).await {
            Ok(Ok(report)) => report,
            Ok(Err(e)) => {
                warn!(instance_id = %record.instance_id, error = %e, "health probe failed");
                HealthReport::new(HealthStatus::Error, e.to_string())
            }
            Err(_) => {
                warn!(instance_id = %record.instance_id, "health probe timed out");
                HealthReport::new(
                    HealthStatus::Offline,
                    format!("Timed out after {:?}", ctx.timeout()),
                )
            }
        }
    }

    /// Gather the full report, plus the database failure when the service
    /// list could not be read.
    pub async fn report(&self, ctx: &CommandContext) -> (HealthOutput, Option<Error>) {
        let records = match self.services.all_services().await {
            Ok(records) => records,
            Err(e) => {
                let output = HealthOutput {
                    success: false,
                    system: SystemHealth {
                        database: HealthStatus::Error,
                        database_error: Some(e.to_string()),
                        service_count: 0,
                    },
                    services: Vec::new(),
                };
                return (output, Some(e));
            }
        };

        let ordered = records.into_iter().sorted_by_key(|record| {
            InstanceId::from_str(&record.instance_id)
                .map(|id| (id.service_type().to_string(), id.number()))
                .unwrap_or_else(|_| (record.instance_id.clone(), 0))
        });

        let mut services = Vec::new();
        for record in ordered {
            let report = self.probe(ctx, &record).await;
            debug!(instance_id = %record.instance_id, status = %report.status, "probed service");
            services.push(ServiceHealth {
                instance_id: record.instance_id,
                display_name: record.display_name,
                url: record.url,
                report,
            });
        }

        let output = HealthOutput {
            success: true,
            system: SystemHealth {
                database: HealthStatus::Online,
                database_error: None,
                service_count: services.len(),
            },
            services,
        };
        (output, None)
    }
}

#[async_trait]
impl Command for HealthCommand {
    fn name(&self) -> &str {
        "health"
    }

    fn description(&self) -> &str {
        "Check system and service health"
    }

    fn usage(&self) -> &str {
        USAGE
    }

    async fn execute(&self, ctx: &CommandContext, args: &[String]) -> Result<()> {
        let (_, rest) = take_flag(args, "--json");
        if !rest.is_empty() {
            return Err(Error::missing_arguments(self.name(), USAGE));
        }

        let (output, database_error) = self.report(ctx).await;

        if ctx.output_for(args).is_json() {
            // The caller prints the error envelope; stdout carries one document.
            if let Some(e) = database_error {
                return Err(e);
            }
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        print_human_readable(&output);
        database_error.map_or(Ok(()), Err)
    }
}

fn status_label(status: HealthStatus) -> String {
    match status {
        HealthStatus::Unknown => "unknown".to_string(),
        other => other.to_string(),
    }
}

fn print_human_readable(output: &HealthOutput) {
    println!("System");
    match output.system.database_error {
        Some(ref err) => println!(
            "  {:<14}{} ({err})",
            "database",
            status_label(output.system.database)
        ),
        None => println!("  {:<14}{}", "database", status_label(output.system.database)),
    }
    println!("  {:<14}{}", "services", output.system.service_count);

    if output.services.is_empty() {
        return;
    }

    println!();
    println!("Services");
    for service in &output.services {
        let version = if service.report.version.is_empty() {
            String::new()
        } else {
            format!(" v{}", service.report.version)
        };
        println!(
            "  {:<14}{:<9}{}{version}  {}",
            service.instance_id,
            status_label(service.report.status),
            service.display_name,
            service.report.message
        );
    }
}
