//! Provider settings and their defaults.

use std::time::Duration;

/// Region every provider call is made against unless overridden.
pub const DEFAULT_REGION: &str = "us-west-2";

/// Seconds between two state polls while waiting.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 15;

/// Seconds a wait may take before it is abandoned (40 polls at the default interval).
pub const DEFAULT_WAIT_TIMEOUT_SECS: u64 = 600;

/// Fixed provider parameters for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub region: String,
    pub poll_interval: Duration,
    pub wait_timeout: Duration,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            wait_timeout: Duration::from_secs(DEFAULT_WAIT_TIMEOUT_SECS),
        }
    }
}
