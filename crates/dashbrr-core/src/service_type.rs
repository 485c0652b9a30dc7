//! Static table of known service types.
//!
//! The help formatter lists these independently of what is registered, and
//! each type doubles as the instance-id prefix (`radarr-1`, `radarr-2`).

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ServiceType {
    Autobrr,
    Omegabrr,
    Radarr,
    Sonarr,
    Prowlarr,
    Plex,
    Overseerr,
    Maintainerr,
    Tailscale,
    General,
}

impl ServiceType {
    /// Every known type, in table order.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }

    /// Name shown to users and used as the default display name of new instances.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Autobrr => "Autobrr",
            Self::Omegabrr => "Omegabrr",
            Self::Radarr => "Radarr",
            Self::Sonarr => "Sonarr",
            Self::Prowlarr => "Prowlarr",
            Self::Plex => "Plex",
            Self::Overseerr => "Overseerr",
            Self::Maintainerr => "Maintainerr",
            Self::Tailscale => "Tailscale",
            Self::General => "General",
        }
    }

    /// `general` services are plain URLs; everything else needs a key or token.
    pub const fn requires_api_key(self) -> bool {
        !matches!(self, Self::General)
    }

    /// Header the service expects its key in.
    pub const fn api_key_header(self) -> &'static str {
        match self {
            Self::Plex => "X-Plex-Token",
            Self::Tailscale => "Authorization",
            _ => "X-Api-Key",
        }
    }

    /// Instance-id prefix, e.g. `"radarr-"`.
    pub fn id_prefix(self) -> String {
        format!("{self}-")
    }

    /// Resolve the type from an instance id such as `"sonarr-3"`.
    pub fn from_instance_id(instance_id: &str) -> Option<Self> {
        instance_id
            .rsplit_once('-')
            .and_then(|(prefix, _)| prefix.parse().ok())
    }
}
