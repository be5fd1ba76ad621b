//! `workman start <label> [--login]`: start an instance and optionally log in.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::lifecycle::{self, StartOutcome};
use crate::output::Renderer;

/// Arguments for the start command.
#[derive(Args)]
pub struct StartArgs {
    /// Label of the instance to start
    pub label: String,

    /// Open an SSH session once the instance is running
    #[arg(short, long)]
    pub login: bool,
}

/// Run `workman start`.
///
/// # Errors
///
/// Returns an error if the label is unknown, the instance cannot be started,
/// or the login session fails.
pub async fn run(app: &AppContext, args: &StartArgs) -> Result<()> {
    let mut registry = app.open_registry()?;
    let provider = app.provider();
    let shell = app.shell();
    let reporter = app.reporter();

    let outcome = lifecycle::start_instance(
        &mut registry,
        &provider,
        &shell,
        &reporter,
        &args.label,
        args.login,
    )
    .await?;
    tracing::info!(label = %args.label, ?outcome, "start finished");

    if let Renderer::Json(r) = app.renderer() {
        let status = match outcome {
            StartOutcome::AlreadyRunning => "already_running",
            StartOutcome::Started => "started",
        };
        r.render_transition(&args.label, status)?;
    }
    Ok(())
}
