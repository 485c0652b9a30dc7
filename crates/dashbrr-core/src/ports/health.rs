//! Health probe contract and report types.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{Result, ServiceType};

/// Probe outcome. `Unknown` serializes as the empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HealthStatus {
    Online,
    Offline,
    Warning,
    Error,
    #[default]
    #[serde(rename = "")]
    #[strum(serialize = "")]
    Unknown,
}

impl HealthStatus {
    pub const fn is_online(self) -> bool {
        matches!(self, Self::Online)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub message: String,
}

impl HealthReport {
    pub fn new(status: HealthStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            version: String::new(),
            message: message.into(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

/// Health check for one kind of service.
///
/// A non-online report is a soft failure. `Err` is reserved for the probe
/// being unable to run at all.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn check_health(&self, url: &str, api_key: Option<&str>) -> Result<HealthReport>;
}

/// Picks the probe for a service type.
pub trait HealthProbes: Send + Sync {
    fn probe_for(&self, service_type: ServiceType) -> Arc<dyn HealthProbe>;
}
