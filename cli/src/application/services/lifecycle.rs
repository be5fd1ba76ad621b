//! Application service: instance start/stop use-cases.
//!
//! Decisions are driven by the state the provider reports, never by anything
//! stored locally. The registry is only written after the remote operation has
//! succeeded.
//!
//! Imports only from `crate::domain` and `crate::application`.

use anyhow::Result;

use crate::application::ports::{
    InstanceProvider, InstanceTarget, ProgressReporter, RegistryStore, RemoteShell,
};
use crate::application::services::registry::Registry;
use crate::application::services::session;
use crate::domain::instance::RemoteState;

/// Outcome of the `start_instance` use-case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// The instance was already running; no start request was sent.
    AlreadyRunning,
    /// A start request was sent and the instance reached `running`.
    Started,
}

/// Outcome of the `stop_instance` use-case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// The instance was already stopped; no stop request was sent.
    AlreadyStopped,
    /// A stop was already in flight; we only waited for it.
    AwaitedStop,
    /// A stop request was sent and the instance reached `stopped`.
    Stopped,
}

/// Start the instance registered under `label`, optionally logging in afterwards.
///
/// # Errors
///
/// Returns an error if the label is unknown, any provider call fails, or the
/// SSH session cannot be established.
pub async fn start_instance(
    registry: &mut Registry<impl RegistryStore>,
    provider: &impl InstanceProvider,
    shell: &impl RemoteShell,
    reporter: &impl ProgressReporter,
    label: &str,
    login: bool,
) -> Result<StartOutcome> {
    let record = registry.get(label)?.clone();
    let target = InstanceTarget {
        remote_id: &record.remote_id,
        profile: &record.profile,
    };
    let id = target.remote_id;

    let state = provider.describe_state(&target).await?;
    tracing::debug!(label, remote_id = id, %state, "observed state before start");

    let outcome = if state == RemoteState::Running {
        reporter.success(&format!("Instance '{id}' is already running."));
        StartOutcome::AlreadyRunning
    } else {
        reporter.step(&format!("Starting instance '{id}'..."));
        provider.start(&target).await?;
        reporter.waiting(&format!("Waiting for instance '{id}' to start..."));
        provider.wait_until_running(&target).await?;
        reporter.success(&format!("Instance '{id}' is now running."));
        StartOutcome::Started
    };
    registry.touch(label);

    if login {
        session::launch(provider, shell, reporter, &record).await?;
    }
    Ok(outcome)
}

/// Stop the instance registered under `label`.
///
/// # Errors
///
/// Returns an error if the label is unknown or any provider call fails.
pub async fn stop_instance(
    registry: &mut Registry<impl RegistryStore>,
    provider: &impl InstanceProvider,
    reporter: &impl ProgressReporter,
    label: &str,
) -> Result<StopOutcome> {
    let record = registry.get(label)?.clone();
    let target = InstanceTarget {
        remote_id: &record.remote_id,
        profile: &record.profile,
    };
    let id = target.remote_id;

    let state = provider.describe_state(&target).await?;
    tracing::debug!(label, remote_id = id, %state, "observed state before stop");

    let outcome = match state {
        RemoteState::Stopped => {
            reporter.success(&format!("Instance '{id}' is already stopped."));
            StopOutcome::AlreadyStopped
        }
        RemoteState::Stopping => {
            reporter.waiting(&format!(
                "Instance '{id}' is currently stopping. Waiting for it to stop..."
            ));
            provider.wait_until_stopped(&target).await?;
            reporter.success(&format!("Instance '{id}' has been stopped."));
            StopOutcome::AwaitedStop
        }
        _ => {
            reporter.step(&format!("Stopping instance '{id}'..."));
            provider.stop(&target).await?;
            reporter.waiting(&format!("Waiting for instance '{id}' to stop..."));
            provider.wait_until_stopped(&target).await?;
            reporter.success(&format!("Instance '{id}' has been stopped."));
            StopOutcome::Stopped
        }
    };
    registry.touch(label);
    Ok(outcome)
}
