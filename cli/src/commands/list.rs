//! `workman list`: show every configured instance.

use anyhow::Result;

use crate::app::AppContext;
use crate::output::Renderer;

/// Run `workman list`.
///
/// # Errors
///
/// Returns an error if the registry cannot be loaded or JSON output fails.
pub fn run(app: &AppContext) -> Result<()> {
    let registry = app.open_registry()?;
    let instances: Vec<_> = registry.iter().collect();

    match app.renderer() {
        Renderer::Human(r) => r.render_instances(&instances),
        Renderer::Json(r) => r.render_instances(&instances)?,
    }
    Ok(())
}
