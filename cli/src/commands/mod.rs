//! Command implementations

pub mod configure;
pub mod list;
pub mod remove;
pub mod start;
pub mod stop;

use clap::Args;

/// Arguments for commands that act on a single registered instance.
#[derive(Args)]
pub struct LabelArgs {
    /// Label of the instance as shown by `workman list`
    pub label: String,
}
