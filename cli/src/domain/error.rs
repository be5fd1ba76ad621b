//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, or `std::process`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Registry errors ───────────────────────────────────────────────────────────

/// Errors raised by the local instance registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("label '{0}' not found")]
    NotFound(String),

    #[error("label '{0}' already exists. Please choose a different label")]
    AlreadyExists(String),

    #[error("invalid label {0:?}: labels must be non-empty and contain no whitespace")]
    InvalidLabel(String),

    #[error("invalid instance '{label}': {reason}")]
    InvalidRecord { label: String, reason: String },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot write to the config file {path}: {source}")]
    Persistence {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ── Provider errors ───────────────────────────────────────────────────────────

/// Errors raised while talking to the compute provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider tool unavailable: {0}")]
    Unavailable(String),

    #[error("instance '{0}' not found")]
    InstanceNotFound(String),

    #[error("failed to {action} instance '{remote_id}': {message}")]
    Rejected {
        action: &'static str,
        remote_id: String,
        message: String,
    },

    #[error("unrecognised instance state '{0}'")]
    UnknownState(String),

    #[error("unexpected provider response: {0}")]
    MalformedResponse(String),

    #[error("timed out after {waited_secs}s waiting for instance '{remote_id}' to be {target}")]
    WaitTimeout {
        remote_id: String,
        target: String,
        waited_secs: u64,
    },

    #[error("instance '{remote_id}' entered state '{state}' while waiting for it to be {target}")]
    WaitFailed {
        remote_id: String,
        target: String,
        state: String,
    },

    #[error("could not retrieve an IP address for instance '{0}'")]
    NoAddress(String),
}

// ── Session errors ────────────────────────────────────────────────────────────

/// Errors raised while handing off to an interactive shell.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("cannot connect to instance '{remote_id}': {reason}")]
    Address { remote_id: String, reason: String },

    #[error("failed to start ssh: {0}")]
    Spawn(String),

    #[error("ssh session exited with status {0}")]
    Exited(i32),

    #[error("ssh session was terminated by a signal")]
    Signalled,
}

/// Short machine-readable code for an error chain, used by `--json` output.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    if let Some(e) = err.downcast_ref::<RegistryError>() {
        return match e {
            RegistryError::NotFound(_) => "not_found",
            _ => "registry",
        };
    }
    if err.downcast_ref::<ProviderError>().is_some() {
        return "provider";
    }
    if err.downcast_ref::<SessionError>().is_some() {
        return "session";
    }
    "error"
}
