//! Application context: unified state passed to every command handler.
//!
//! `AppContext` carries the resolved output context, the registry location and
//! the provider settings. Commands build their adapters from it on demand, so
//! a command that never talks to the provider never constructs one.

use std::path::PathBuf;

use anyhow::Result;

use crate::application::services::registry::Registry;
use crate::domain::config::ProviderSettings;
use crate::infra::aws::AwsCliProvider;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::registry_store::JsonRegistryStore;
use crate::infra::ssh::SshShell;
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer, TerminalReporter};

/// Environment variable that, like `CI`, skips confirmation prompts.
pub const YES_ENV: &str = "WORKMAN_YES";

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Behaviour flags.
pub struct BehaviourFlags {
    /// Skip interactive confirmation (also set by `CI` / `WORKMAN_YES` env vars).
    pub yes: bool,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Behaviour options.
    pub behaviour: BehaviourFlags,
}

/// Unified application context passed to every command handler.
///
/// Constructed once in `Cli::run()` and passed as `&AppContext` to all
/// command handlers.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// When `true`, confirmations are answered without prompting.
    ///
    /// Set when `--yes` / `-y` is passed, or when the `CI` or `WORKMAN_YES`
    /// environment variables are present.
    pub non_interactive: bool,
    /// Location of the registry document.
    pub registry_path: PathBuf,
    /// Region and wait tuning for the provider.
    pub settings: ProviderSettings,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    #[must_use]
    pub fn new(flags: &AppFlags, registry_path: PathBuf, settings: ProviderSettings) -> Self {
        let ci_env = std::env::var_os("CI").is_some() || std::env::var_os(YES_ENV).is_some();
        let non_interactive = flags.behaviour.yes || ci_env;

        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        let quiet = flags.output.quiet || flags.output.json;
        Self {
            output: OutputContext::new(flags.output.no_color, quiet),
            mode,
            non_interactive,
            registry_path,
            settings,
        }
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }

    /// Load the registry document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document exists but cannot be read, parsed, or
    /// validated.
    pub fn open_registry(&self) -> Result<Registry<JsonRegistryStore>> {
        Registry::load(JsonRegistryStore::new(self.registry_path.clone()))
    }

    /// Provider adapter backed by the `aws` CLI.
    #[must_use]
    pub fn provider(&self) -> AwsCliProvider<TokioCommandRunner> {
        AwsCliProvider::new(TokioCommandRunner::default(), self.settings.clone())
    }

    /// Interactive SSH adapter.
    #[must_use]
    pub fn shell(&self) -> SshShell<TokioCommandRunner> {
        SshShell::new(TokioCommandRunner::default())
    }

    /// Progress reporter writing to this context's terminal.
    #[must_use]
    pub fn reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output)
    }

    /// Ask the user for confirmation.
    ///
    /// When `non_interactive` is `true` (CI, `--yes` flag, or `WORKMAN_YES` env),
    /// returns `true` immediately without prompting.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails (e.g. no TTY available).
    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.non_interactive {
            return Ok(true);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(confirmed)
    }
}
