//! Per-type instance identifiers of the form `<type>-<n>`.
//!
//! The next id is derived from the ids that exist when `add` runs: the largest
//! `n` carrying the prefix plus one. Gaps left by removed instances are never
//! filled and a live id is never handed out twice.
//!
//! Allocation is read-then-write with no lock held across the insert. Two
//! concurrent `add` runs for the same type can compute the same id; the
//! second insert then fails on the store's unique constraint.

use std::{fmt, str::FromStr};

use crate::{Error, Result, ServiceType};

/// Parsed instance id, e.g. `radarr-3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId {
    service_type: ServiceType,
    number: u64,
}

impl InstanceId {
    pub const fn new(service_type: ServiceType, number: u64) -> Self {
        Self {
            service_type,
            number,
        }
    }

    pub const fn service_type(&self) -> ServiceType {
        self.service_type
    }

    pub const fn number(&self) -> u64 {
        self.number
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.service_type, self.number)
    }
}

impl FromStr for InstanceId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (prefix, suffix) = s
            .rsplit_once('-')
            .ok_or_else(|| Error::parse_error(format!("Instance id '{s}' has no '-<n>' suffix")))?;
        let service_type = prefix
            .parse::<ServiceType>()
            .map_err(|_| Error::parse_error(format!("Unknown service type in instance id '{s}'")))?;
        let number = parse_suffix(suffix)
            .ok_or_else(|| Error::parse_error(format!("Invalid instance number in '{s}'")))?;
        Ok(Self::new(service_type, number))
    }
}

/// Strict decimal suffix: non-empty, ASCII digits only.
fn parse_suffix(suffix: &str) -> Option<u64> {
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    suffix.parse().ok()
}

/// Next instance number for `prefix` given the ids that currently exist.
///
/// Ids without the prefix, and ids whose suffix is not a plain decimal number,
/// are ignored.
///
/// # Errors
///
/// Returns `ValidationError::InstanceIdsExhausted` when the highest live
/// number is `u64::MAX`.
pub fn next_instance_number<'a, I>(prefix: &str, existing: I) -> Result<u64>
where
    I: IntoIterator<Item = &'a str>,
{
    existing
        .into_iter()
        .filter_map(|id| id.strip_prefix(prefix))
        .filter_map(parse_suffix)
        .max()
        .map_or(Some(1), |max| max.checked_add(1))
        .ok_or_else(|| Error::instance_ids_exhausted(prefix))
}

/// Next instance id for `prefix` (e.g. `"radarr-"`), formatted as `<prefix><n>`.
///
/// # Errors
///
/// Same as [`next_instance_number`].
pub fn next_instance_id<'a, I>(prefix: &str, existing: I) -> Result<String>
where
    I: IntoIterator<Item = &'a str>,
{
    next_instance_number(prefix, existing).map(|n| format!("{prefix}{n}"))
}
