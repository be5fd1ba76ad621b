//! JSON output helpers.
//!
//! Provides the instance listing and the error-object formatter used by all
//! `--json` code paths when a command fails.

use anyhow::{Context, Result};
use chrono::SecondsFormat;

use crate::domain::instance::InstanceRecord;

/// Renders registry contents as machine-readable JSON on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    /// Print every configured instance as one JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_instances(&self, instances: &[(&str, &InstanceRecord)]) -> Result<()> {
        println!("{}", format_instances(instances)?);
        Ok(())
    }

    /// Print the result of a start or stop as a one-line JSON object.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_transition(&self, label: &str, status: &str) -> Result<()> {
        let obj = serde_json::json!({ "label": label, "status": status });
        println!(
            "{}",
            serde_json::to_string(&obj).context("JSON serialization failed")?
        );
        Ok(())
    }
}

/// Format the instance listing.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "instances": [
///     { "label": "web", "id": "i-123", "last_accessed": null, ... }
///   ]
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_instances(instances: &[(&str, &InstanceRecord)]) -> Result<String> {
    let entries: Vec<serde_json::Value> = instances
        .iter()
        .map(|(label, record)| {
            serde_json::json!({
                "label": label,
                "id": record.remote_id,
                "pem": record.key_file.display().to_string(),
                "aws_profile": record.profile,
                "instance_user": record.ssh_user,
                "use_private_ip": record.prefer_private_address,
                "last_accessed": record
                    .last_accessed_at
                    .map(|ts| ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            })
        })
        .collect();
    serde_json::to_string_pretty(&serde_json::json!({ "instances": entries }))
        .context("JSON serialization failed")
}

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}
