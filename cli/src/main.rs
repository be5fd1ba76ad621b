//! Workman CLI - start, stop and log in to labelled EC2 instances

use clap::Parser;
use tracing_subscriber::EnvFilter;

use workman_cli::cli::Cli;
use workman_cli::domain::error_code;
use workman_cli::output::json::format_error;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let json = cli.json;
    if let Err(e) = cli.run().await {
        if json {
            let message = format!("{e:#}");
            match format_error(&message, error_code(&e)) {
                Ok(obj) => eprintln!("{obj}"),
                Err(_) => eprintln!("Error: {message}"),
            }
        } else {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(1);
    }
}
