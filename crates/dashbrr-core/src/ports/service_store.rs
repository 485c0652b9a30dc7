//! Persistence boundary for registered service instances.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{Result, ServiceType};

/// A registered service instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
    /// `<type>-<n>`, e.g. `radarr-2`
    pub instance_id: String,
    pub display_name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Link shown to users when it differs from the probe URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_url: Option<String>,
}

impl ServiceRecord {
    pub fn service_type(&self) -> Option<ServiceType> {
        ServiceType::from_instance_id(&self.instance_id)
    }
}

/// Trait defining the persistence boundary for service records.
///
/// Implementations surface their failures as collaborator errors; callers
/// wrap nothing and pass them through verbatim.
#[async_trait]
pub trait ServiceStore: Send + Sync {
    /// Persist a new record.
    async fn create_service(&self, record: &ServiceRecord) -> Result<()>;

    /// Delete by instance id. Returns `true` when a record was removed.
    async fn delete_service(&self, instance_id: &str) -> Result<bool>;

    /// Every record, in no guaranteed order.
    async fn all_services(&self) -> Result<Vec<ServiceRecord>>;

    /// Record registered under exactly this URL, if any.
    async fn find_service_by_url(&self, url: &str) -> Result<Option<ServiceRecord>>;
}
