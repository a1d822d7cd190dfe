use crate::commands::Commands;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "ml-poller")]
#[command(about = "Ingests Spotify listening history for mootslive")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Defaults to `run`
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,
}

impl Cli {
    pub(crate) fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Run)
    }
}
