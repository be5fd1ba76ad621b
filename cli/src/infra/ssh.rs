//! Infrastructure implementation of the `RemoteShell` port.

use std::path::Path;
use std::process::ExitStatus;

use anyhow::Result;

use crate::application::ports::{CommandRunner, RemoteShell};

/// SSH client executable.
pub const SSH_PROGRAM: &str = "ssh";

/// Interactive `ssh` session with inherited stdio.
pub struct SshShell<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> SshShell<R> {
    #[must_use]
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl<R: CommandRunner> RemoteShell for SshShell<R> {
    async fn connect(&self, key_file: &Path, user: &str, address: &str) -> Result<ExitStatus> {
        let key = key_file.to_string_lossy();
        let destination = format!("{user}@{address}");
        tracing::debug!(key = %key, %destination, "opening ssh session");
        self.runner
            .run_status(SSH_PROGRAM, &["-i", &*key, destination.as_str()])
            .await
    }
}
