//! Infrastructure implementation of the `InstanceProvider` port.
//!
//! `AwsCliProvider` drives EC2 through the `aws` command-line tool. Every call
//! passes `--profile` and `--region` explicitly, so credentials are resolved
//! afresh by the tool for each operation.

use std::process::Output;

use anyhow::Result;
use serde::Deserialize;

use crate::application::ports::{CommandRunner, InstanceProvider, InstanceTarget};
use crate::domain::config::ProviderSettings;
use crate::domain::error::ProviderError;
use crate::domain::instance::{Address, RemoteState, WaitTarget, WaitVerdict, select_address};

/// Provider CLI executable.
pub const AWS_PROGRAM: &str = "aws";

/// Error code the provider returns for unknown instance ids.
const NOT_FOUND_CODE: &str = "InvalidInstanceID.NotFound";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeInstancesResponse {
    #[serde(default)]
    reservations: Vec<Reservation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Reservation {
    #[serde(default)]
    instances: Vec<Ec2Instance>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Ec2Instance {
    state: Ec2State,
    public_ip_address: Option<String>,
    private_ip_address: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Ec2State {
    name: String,
}

/// EC2 adapter over a [`CommandRunner`].
pub struct AwsCliProvider<R: CommandRunner> {
    runner: R,
    settings: ProviderSettings,
}

impl<R: CommandRunner> AwsCliProvider<R> {
    #[must_use]
    pub fn new(runner: R, settings: ProviderSettings) -> Self {
        Self { runner, settings }
    }

    #[must_use]
    pub fn settings(&self) -> &ProviderSettings {
        &self.settings
    }

    /// Run `aws ec2 <operation>` for one instance and check the exit status.
    async fn ec2(
        &self,
        action: &'static str,
        operation: &str,
        target: &InstanceTarget<'_>,
    ) -> Result<Output> {
        let args = [
            "ec2",
            operation,
            "--instance-ids",
            target.remote_id,
            "--profile",
            target.profile,
            "--region",
            self.settings.region.as_str(),
            "--output",
            "json",
        ];
        tracing::debug!(
            operation,
            remote_id = target.remote_id,
            profile = target.profile,
            region = %self.settings.region,
            "calling provider"
        );
        let output = self
            .runner
            .run(AWS_PROGRAM, &args)
            .await
            .map_err(|e| ProviderError::Unavailable(format!("{e:#}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if stderr.contains(NOT_FOUND_CODE) {
                return Err(ProviderError::InstanceNotFound(target.remote_id.to_string()).into());
            }
            return Err(ProviderError::Rejected {
                action,
                remote_id: target.remote_id.to_string(),
                message: stderr,
            }
            .into());
        }
        Ok(output)
    }

    async fn describe(&self, target: &InstanceTarget<'_>) -> Result<Ec2Instance> {
        let output = self.ec2("describe", "describe-instances", target).await?;
        parse_describe(&output.stdout, target.remote_id)
    }

    /// Poll until `wanted` is reached, a dead-end state shows up, or time runs out.
    async fn wait_for(&self, target: &InstanceTarget<'_>, wanted: WaitTarget) -> Result<()> {
        let started = tokio::time::Instant::now();
        let timeout = self.settings.wait_timeout;
        loop {
            let state = self.describe_state(target).await?;
            tracing::debug!(remote_id = target.remote_id, %state, %wanted, "polled instance state");
            match wanted.verdict(state) {
                WaitVerdict::Reached => return Ok(()),
                WaitVerdict::Unreachable => {
                    return Err(ProviderError::WaitFailed {
                        remote_id: target.remote_id.to_string(),
                        target: wanted.to_string(),
                        state: state.to_string(),
                    }
                    .into());
                }
                WaitVerdict::KeepPolling => {}
            }

            let waited = started.elapsed();
            if waited >= timeout {
                return Err(ProviderError::WaitTimeout {
                    remote_id: target.remote_id.to_string(),
                    target: wanted.to_string(),
                    waited_secs: waited.as_secs(),
                }
                .into());
            }
            tokio::time::sleep(self.settings.poll_interval.min(timeout - waited)).await;
        }
    }
}

/// Extract the single instance from a `describe-instances` payload.
fn parse_describe(stdout: &[u8], remote_id: &str) -> Result<Ec2Instance> {
    let response: DescribeInstancesResponse = serde_json::from_slice(stdout)
        .map_err(|e| ProviderError::MalformedResponse(format!("describe-instances: {e}")))?;
    response
        .reservations
        .into_iter()
        .flat_map(|r| r.instances)
        .next()
        .ok_or_else(|| ProviderError::InstanceNotFound(remote_id.to_string()).into())
}

impl<R: CommandRunner> InstanceProvider for AwsCliProvider<R> {
    async fn describe_state(&self, target: &InstanceTarget<'_>) -> Result<RemoteState> {
        let instance = self.describe(target).await?;
        Ok(instance.state.name.parse()?)
    }

    async fn start(&self, target: &InstanceTarget<'_>) -> Result<()> {
        self.ec2("start", "start-instances", target).await?;
        Ok(())
    }

    async fn stop(&self, target: &InstanceTarget<'_>) -> Result<()> {
        self.ec2("stop", "stop-instances", target).await?;
        Ok(())
    }

    async fn wait_until_running(&self, target: &InstanceTarget<'_>) -> Result<()> {
        self.wait_for(target, WaitTarget::Running).await
    }

    async fn wait_until_stopped(&self, target: &InstanceTarget<'_>) -> Result<()> {
        self.wait_for(target, WaitTarget::Stopped).await
    }

    async fn resolve_address(
        &self,
        target: &InstanceTarget<'_>,
        prefer_private: bool,
    ) -> Result<Address> {
        let instance = self.describe(target).await?;
        select_address(
            instance.public_ip_address.as_deref(),
            instance.private_ip_address.as_deref(),
            prefer_private,
        )
        .ok_or_else(|| ProviderError::NoAddress(target.remote_id.to_string()).into())
    }
}
