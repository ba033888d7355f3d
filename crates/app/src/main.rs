//! Tether - Main Entry Point
//!
//! Installs logging, resolves configuration, wires the services and runs
//! the requested command.

use std::process::ExitCode;

use clap::Parser;
use tether::{AppError, Cli, Services, commands};
use tether_application::ClientConfig;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so command output stays pipeable.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<String, AppError> {
    let mut config = ClientConfig::from_env()?;
    if let Some(environment) = cli.env {
        config = config.with_environment(environment);
    }
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }

    tracing::info!(
        environment = %config.environment,
        "starting Tether v{}",
        env!("CARGO_PKG_VERSION")
    );

    let services = Services::production(config)?;
    services.start().await;
    commands::run(cli.command, &services).await
}
