//! `workman remove <label>`: forget a configured instance.
//!
//! Only the local entry is deleted; the remote instance is left untouched.

use anyhow::Result;

use crate::app::AppContext;
use crate::commands::LabelArgs;
use crate::domain::error::RegistryError;

/// Run `workman remove`.
///
/// # Errors
///
/// Returns an error if the label is unknown, the prompt fails, or the registry
/// cannot be written.
pub fn run(app: &AppContext, args: &LabelArgs) -> Result<()> {
    let mut registry = app.open_registry()?;
    let label = args.label.as_str();
    if !registry.contains(label) {
        return Err(RegistryError::NotFound(label.to_string()).into());
    }

    let prompt = format!("Are you sure you want to remove the instance '{label}'?");
    if !app.confirm(&prompt, false)? {
        app.output.info("Operation canceled.");
        return Ok(());
    }

    let removed = registry.remove(label)?;
    tracing::info!(label, remote_id = %removed.remote_id, "instance removed");
    app.output
        .success(&format!("Instance '{label}' has been successfully removed."));
    Ok(())
}
