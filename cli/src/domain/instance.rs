//! Instance domain types and pure validation functions.
//!
//! This module is intentionally free of I/O, async, and external layer imports.
//! All functions take data in and return data out.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use chrono::{DateTime, FixedOffset, Local, SubsecRound};
use serde::{Deserialize, Serialize};

use crate::domain::error::{ProviderError, RegistryError};

/// Login user offered by the configure wizard when none is entered.
pub const DEFAULT_INSTANCE_USER: &str = "ubuntu";

/// Credential profile offered by the configure wizard when none is entered.
pub const DEFAULT_PROFILE: &str = "default";

/// The full registry document: label → record, ordered by label.
pub type RegistryDocument = BTreeMap<String, InstanceRecord>;

/// One managed instance, as persisted in the registry document.
///
/// The label is not part of the record; it is the document key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceRecord {
    /// Provider-assigned instance id (e.g. `i-0abc123`).
    #[serde(rename = "id")]
    pub remote_id: String,
    /// Private key used for SSH authentication.
    #[serde(rename = "pem")]
    pub key_file: PathBuf,
    /// Provider credential profile name.
    #[serde(rename = "aws_profile")]
    pub profile: String,
    /// Remote login user recorded at configure time.
    #[serde(rename = "instance_user", default)]
    pub ssh_user: String,
    /// Prefer the private address over the public one for SSH.
    #[serde(
        rename = "use_private_ip",
        default,
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub prefer_private_address: bool,
    /// Last time the instance was reached in a running or stopped state.
    #[serde(
        rename = "last_accessed",
        default,
        skip_serializing_if = "Option::is_none",
        with = "rfc3339_opt"
    )]
    pub last_accessed_at: Option<DateTime<FixedOffset>>,
    /// Keys not modelled above, carried through rewrites untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl InstanceRecord {
    /// A freshly configured record that has never been accessed.
    #[must_use]
    pub fn new(
        remote_id: impl Into<String>,
        key_file: impl Into<PathBuf>,
        profile: impl Into<String>,
        ssh_user: impl Into<String>,
        prefer_private_address: bool,
    ) -> Self {
        Self {
            remote_id: remote_id.into(),
            key_file: key_file.into(),
            profile: profile.into(),
            ssh_user: ssh_user.into(),
            prefer_private_address,
            last_accessed_at: None,
            extra: serde_json::Map::new(),
        }
    }
}

/// Current local time in the fixed format stored for `last_accessed`.
#[must_use]
pub fn access_timestamp() -> DateTime<FixedOffset> {
    Local::now().fixed_offset().trunc_subsecs(0)
}

/// Validates a registry label: non-empty and free of whitespace.
///
/// # Errors
///
/// Returns [`RegistryError::InvalidLabel`] if the label is rejected.
pub fn validate_label(label: &str) -> Result<()> {
    if label.is_empty() || label.chars().any(char::is_whitespace) {
        return Err(RegistryError::InvalidLabel(label.to_string()).into());
    }
    Ok(())
}

/// Validates a record stored under `label`.
///
/// # Errors
///
/// Returns [`RegistryError::InvalidRecord`] if the instance id is empty.
pub fn validate_record(label: &str, record: &InstanceRecord) -> Result<()> {
    if record.remote_id.trim().is_empty() {
        return Err(RegistryError::InvalidRecord {
            label: label.to_string(),
            reason: "instance id is empty".to_string(),
        }
        .into());
    }
    Ok(())
}

// ── Remote state ──────────────────────────────────────────────────────────────

/// Instance state as reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteState {
    Pending,
    Running,
    Stopping,
    Stopped,
    ShuttingDown,
    Terminated,
}

impl RemoteState {
    /// The provider's wire name for this state.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Stopping => "stopping",
            Self::Stopped => "stopped",
            Self::ShuttingDown => "shutting-down",
            Self::Terminated => "terminated",
        }
    }
}

impl fmt::Display for RemoteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RemoteState {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "running" => Ok(Self::Running),
            "stopping" => Ok(Self::Stopping),
            "stopped" => Ok(Self::Stopped),
            "shutting-down" => Ok(Self::ShuttingDown),
            "terminated" => Ok(Self::Terminated),
            other => Err(ProviderError::UnknownState(other.to_string())),
        }
    }
}

/// State a wait loop is polling for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitTarget {
    Running,
    Stopped,
}

/// What a single observation means for a wait loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitVerdict {
    Reached,
    KeepPolling,
    /// The target can no longer be reached from the observed state.
    Unreachable,
}

impl WaitTarget {
    /// Classify an observed state against this target.
    #[must_use]
    pub fn verdict(self, observed: RemoteState) -> WaitVerdict {
        use RemoteState as S;
        match (self, observed) {
            (Self::Running, S::Running) | (Self::Stopped, S::Stopped) => WaitVerdict::Reached,
            (Self::Running, S::Stopping | S::ShuttingDown | S::Terminated)
            | (Self::Stopped, S::ShuttingDown | S::Terminated) => WaitVerdict::Unreachable,
            _ => WaitVerdict::KeepPolling,
        }
    }
}

impl fmt::Display for WaitTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => f.write_str("running"),
            Self::Stopped => f.write_str("stopped"),
        }
    }
}

// ── Addresses ─────────────────────────────────────────────────────────────────

/// Which network address was chosen for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Address {
    Public(String),
    Private(String),
}

impl Address {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Public(ip) | Self::Private(ip) => ip,
        }
    }

    #[must_use]
    pub fn is_private(&self) -> bool {
        matches!(self, Self::Private(_))
    }
}

/// Pick the address to connect to.
///
/// The private address wins when `prefer_private` is set or no public address
/// exists; a missing preferred address falls back to the other one. Empty
/// strings count as missing.
#[must_use]
pub fn select_address(
    public: Option<&str>,
    private: Option<&str>,
    prefer_private: bool,
) -> Option<Address> {
    let public = public.filter(|ip| !ip.is_empty());
    let private = private.filter(|ip| !ip.is_empty());
    let private_first = prefer_private || public.is_none();
    match (private_first, public, private) {
        (true, _, Some(ip)) | (false, None, Some(ip)) => Some(Address::Private(ip.to_string())),
        (_, Some(ip), _) => Some(Address::Public(ip.to_string())),
        (_, None, None) => None,
    }
}

mod rfc3339_opt {
    use chrono::{DateTime, FixedOffset, SecondsFormat};
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::ref_option)] // serde `with` passes `&Option<T>`
    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<FixedOffset>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(ts) => {
                serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<FixedOffset>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(s) if s.is_empty() => Ok(None),
            Some(s) => DateTime::parse_from_rfc3339(&s)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
