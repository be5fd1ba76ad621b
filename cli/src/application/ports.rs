//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::Path;
use std::process::{ExitStatus, Output};

use anyhow::Result;

use crate::domain::{Address, RegistryDocument, RemoteState};

// ── Value Types ───────────────────────────────────────────────────────────────

/// Identity of a remote instance plus the credential profile used to reach it.
#[derive(Debug, Clone, Copy)]
pub struct InstanceTarget<'a> {
    /// Provider-assigned instance id.
    pub remote_id: &'a str,
    /// Credential profile the provider resolves on every call.
    pub profile: &'a str,
}

// ── Provider Port ─────────────────────────────────────────────────────────────

/// Remote compute provider: state queries, lifecycle calls, and waits.
#[allow(async_fn_in_trait)]
pub trait InstanceProvider {
    /// Current provider-side state of the instance.
    async fn describe_state(&self, target: &InstanceTarget<'_>) -> Result<RemoteState>;
    /// Request the instance to start.
    async fn start(&self, target: &InstanceTarget<'_>) -> Result<()>;
    /// Request the instance to stop.
    async fn stop(&self, target: &InstanceTarget<'_>) -> Result<()>;
    /// Block until the instance is running, or fail on timeout or a dead-end state.
    async fn wait_until_running(&self, target: &InstanceTarget<'_>) -> Result<()>;
    /// Block until the instance is stopped, or fail on timeout or a dead-end state.
    async fn wait_until_stopped(&self, target: &InstanceTarget<'_>) -> Result<()>;
    /// Resolve the address an SSH session should connect to.
    async fn resolve_address(
        &self,
        target: &InstanceTarget<'_>,
        prefer_private: bool,
    ) -> Result<Address>;
}

// ── Session Port ──────────────────────────────────────────────────────────────

/// Interactive remote shell connected to the caller's terminal.
#[allow(async_fn_in_trait)]
pub trait RemoteShell {
    /// Open a session and block until it ends, returning the client's exit status.
    async fn connect(&self, key_file: &Path, user: &str, address: &str) -> Result<ExitStatus>;
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: std::time::Duration,
    ) -> Result<Output>;
    /// Run a program with inherited stdio and return only its exit status.
    async fn run_status(&self, program: &str, args: &[&str]) -> Result<ExitStatus>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait, no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Signal the start of a potentially long wait.
    fn waiting(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
}

// ── Registry Storage Port ─────────────────────────────────────────────────────

/// Abstracts persistence of the whole registry document.
pub trait RegistryStore {
    /// Read the document, returning `None` if it does not exist yet.
    fn load(&self) -> Result<Option<RegistryDocument>>;
    /// Replace the document with `doc`.
    fn save(&self, doc: &RegistryDocument) -> Result<()>;
    /// Human-readable location of the document, for messages.
    fn location(&self) -> String;
}

impl<T: RegistryStore + ?Sized> RegistryStore for &T {
    fn load(&self) -> Result<Option<RegistryDocument>> {
        (**self).load()
    }

    fn save(&self, doc: &RegistryDocument) -> Result<()> {
        (**self).save(doc)
    }

    fn location(&self) -> String {
        (**self).location()
    }
}
