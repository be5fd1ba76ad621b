//! `workman stop <label>`: stop an instance and wait until it is stopped.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::lifecycle::{self, StopOutcome};
use crate::commands::LabelArgs;
use crate::output::Renderer;

/// Run `workman stop`.
///
/// # Errors
///
/// Returns an error if the label is unknown or the instance cannot be stopped.
pub async fn run(app: &AppContext, args: &LabelArgs) -> Result<()> {
    let mut registry = app.open_registry()?;
    let provider = app.provider();
    let reporter = app.reporter();

    let outcome = lifecycle::stop_instance(&mut registry, &provider, &reporter, &args.label).await?;
    tracing::info!(label = %args.label, ?outcome, "stop finished");

    if let Renderer::Json(r) = app.renderer() {
        let status = match outcome {
            StopOutcome::AlreadyStopped => "already_stopped",
            StopOutcome::AwaitedStop | StopOutcome::Stopped => "stopped",
        };
        r.render_transition(&args.label, status)?;
    }
    Ok(())
}
