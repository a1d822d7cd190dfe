use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub(crate) enum Commands {
    /// Poll every linked Spotify account until Ctrl+C
    Run,

    /// Scan one account once and print the result
    Scan {
        /// Spotify user id of the linked account
        spotify_user_id: String,
    },

    /// Link a Spotify account using an OAuth token obtained elsewhere
    Link {
        #[arg(long)]
        spotify_user_id: String,

        /// JSON file with `access_token` and optionally `refresh_token`,
        /// `token_type` and `expiry`
        #[arg(long)]
        token_file: PathBuf,
    },
}
