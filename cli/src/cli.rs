//! CLI argument parsing with clap derive

use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags};
use crate::commands;
use crate::domain::config::{
    DEFAULT_POLL_INTERVAL_SECS, DEFAULT_REGION, DEFAULT_WAIT_TIMEOUT_SECS, ProviderSettings,
};
use crate::infra::config::registry_path;

/// A CLI tool to manage EC2 instances
#[derive(Parser)]
#[command(
    name = "workman",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Answer yes to confirmation prompts
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(flatten)]
    pub provider: ProviderArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Provider tuning shared by every command.
#[derive(Args)]
pub struct ProviderArgs {
    /// AWS region the instances live in
    #[arg(long, global = true, env = "WORKMAN_AWS_REGION", default_value = DEFAULT_REGION)]
    pub region: String,

    /// Seconds between state polls while waiting
    #[arg(
        long,
        global = true,
        env = "WORKMAN_POLL_INTERVAL",
        value_name = "SECS",
        default_value_t = DEFAULT_POLL_INTERVAL_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub poll_interval: u64,

    /// Seconds to wait for a state transition before giving up
    #[arg(
        long,
        global = true,
        env = "WORKMAN_WAIT_TIMEOUT",
        value_name = "SECS",
        default_value_t = DEFAULT_WAIT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub wait_timeout: u64,
}

impl ProviderArgs {
    fn settings(&self) -> ProviderSettings {
        ProviderSettings {
            region: self.region.clone(),
            poll_interval: Duration::from_secs(self.poll_interval),
            wait_timeout: Duration::from_secs(self.wait_timeout),
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Start an instance
    Start(commands::start::StartArgs),

    /// Stop an instance
    Stop(commands::LabelArgs),

    /// List all configured instances
    #[command(visible_alias = "ls")]
    List,

    /// Remove a configured instance
    #[command(visible_alias = "rm")]
    Remove(commands::LabelArgs),

    /// Configure a new instance
    Configure,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry location cannot be resolved or the
    /// command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            json,
            quiet,
            no_color,
            yes,
            provider,
            command,
        } = self;

        let flags = AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            behaviour: BehaviourFlags { yes },
        };
        let app = AppContext::new(&flags, registry_path()?, provider.settings());
        tracing::debug!(registry = %app.registry_path.display(), "registry location resolved");

        match command {
            Command::Start(args) => commands::start::run(&app, &args).await,
            Command::Stop(args) => commands::stop::run(&app, &args).await,
            Command::List => commands::list::run(&app),
            Command::Remove(args) => commands::remove::run(&app, &args),
            Command::Configure => commands::configure::run(&app),
        }
    }
}
