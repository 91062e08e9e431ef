//! catalog - command-line front-end for the vehicle and plan catalog

mod cli;
mod commands;
mod logger;
mod render;

use catalog_client::{ClientConfig, ClientError};
use clap::Parser;
use cli::Cli;
use std::process::ExitCode;

fn build_config(cli: &Cli) -> ClientConfig {
    let mut config = ClientConfig::from_env();
    if let Some(url) = &cli.api_url {
        config.base_url = url.clone();
    }
    if let Some(collection) = &cli.collection {
        config.collection = collection.clone();
    }
    if let Some(path) = &cli.token_path {
        config.token_path = path.clone();
    }
    config
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logger::init_logger(cli.verbose, cli.log_dir.as_deref());

    let config = build_config(&cli);
    match commands::run(cli.command, &config, cli.json).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            match e.downcast_ref::<ClientError>() {
                Some(client_error) => eprintln!("error: {}", client_error.user_message()),
                None => eprintln!("error: {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}
