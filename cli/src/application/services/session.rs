//! Application service: hand-off to an interactive SSH session.

use anyhow::Result;

use crate::application::ports::{InstanceProvider, InstanceTarget, ProgressReporter, RemoteShell};
use crate::domain::error::SessionError;
use crate::domain::instance::InstanceRecord;

/// Login user for every session.
///
/// The per-instance `ssh_user` is recorded at configure time but is not used
/// here; see [`launch`].
pub const SESSION_USER: &str = "ec2-user";

/// Resolve the instance address and run an interactive session against it.
///
/// Blocks until the session ends. The record's `ssh_user` is not consulted:
/// sessions always log in as [`SESSION_USER`], and a mismatch is only traced.
///
/// # Errors
///
/// Returns a [`SessionError`] if no address can be resolved, the client cannot
/// be started, or it exits unsuccessfully.
pub async fn launch(
    provider: &impl InstanceProvider,
    shell: &impl RemoteShell,
    reporter: &impl ProgressReporter,
    record: &InstanceRecord,
) -> Result<()> {
    let target = InstanceTarget {
        remote_id: &record.remote_id,
        profile: &record.profile,
    };

    let address = provider
        .resolve_address(&target, record.prefer_private_address)
        .await
        .map_err(|e| SessionError::Address {
            remote_id: record.remote_id.clone(),
            reason: format!("{e:#}"),
        })?;
    if address.is_private() {
        reporter.step("Using private IP for SSH connection.");
    }

    if !record.ssh_user.is_empty() && record.ssh_user != SESSION_USER {
        tracing::warn!(
            configured = %record.ssh_user,
            used = SESSION_USER,
            "configured instance user is not used for ssh sessions"
        );
    }

    reporter.step(&format!(
        "Connecting to instance '{}' via SSH...",
        record.remote_id
    ));
    let status = shell
        .connect(&record.key_file, SESSION_USER, address.as_str())
        .await
        .map_err(|e| SessionError::Spawn(format!("{e:#}")))?;

    if status.success() {
        return Ok(());
    }
    match status.code() {
        Some(code) => Err(SessionError::Exited(code).into()),
        None => Err(SessionError::Signalled.into()),
    }
}
