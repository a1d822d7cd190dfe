//! ml-poller - mootslive listen ingestion
//!
//! ```bash
//! # Poll every linked account until Ctrl+C
//! ml-poller
//!
//! # One manual scan
//! ml-poller scan <spotify-user-id>
//!
//! # Link an account from a token obtained out-of-band
//! ml-poller link --spotify-user-id <id> --token-file token.json
//! ```

mod app;
mod cli;
mod commands;
mod error;
mod logger;


use crate::{cli::Cli, commands::Commands, error::Result as PollerErrorResult};

use ml_config::Config;
use ml_ingest::PollerSettings;

use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> PollerErrorResult<()> {
    dotenvy::dotenv().ok();

    // Load and validate configuration
    let config = Config::load()?;
    config.validate()?;

    // Initialize logger (before any other logging)
    logger::initialize(
        config.logging.level,
        config.log_file_path()?,
        config.logging.colored,
    )?;

    info!("Starting ml-poller v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let store = app::open_store(&config).await?;

    match cli.command() {
        Commands::Run => {
            let scanner = app::build_scanner(&config, store)?;
            let cancel = CancellationToken::new();

            let cancel_for_signal = cancel.clone();
            tokio::spawn(async move {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => {
                        info!("Received SIGINT (Ctrl+C), stopping after the current sweep");
                        cancel_for_signal.cancel();
                    }
                    Err(e) => {
                        error!("Failed to listen for SIGINT: {}", e);
                    }
                }
            });

            app::run_poller(scanner, PollerSettings::from(&config.poller), cancel).await
        }

        Commands::Scan { spotify_user_id } => {
            let scanner = app::build_scanner(&config, store)?;
            let report = app::scan_once(&scanner, &spotify_user_id).await?;
            println!("{}", report);
            Ok(())
        }

        Commands::Link {
            spotify_user_id,
            token_file,
        } => {
            let credentials = app::read_token_file(&token_file)?;
            let account = app::link_account(&store, &spotify_user_id, credentials).await?;
            println!("Linked {} as account {}", spotify_user_id, account.id);
            Ok(())
        }
    }
}
