use crate::error::{PollerError, Result as PollerErrorResult};

use ml_config::Config;
use ml_core::{Account, OAuthToken, Provider, User};
use ml_db::{
    AccountRepository, InstrumentedStore, ListenStore, PoolOptions, SqliteListenStore,
    UserRepository, open_pool,
};
use ml_ingest::{AccountScanner, IngestError, Poller, PollerSettings, ScanReport, ScannerConfig};
use ml_spotify::SpotifyClient;

use std::path::Path;
use std::time::Duration;

use log::info;
use tokio_util::sync::CancellationToken;

pub(crate) type SpotifyScanner =
    AccountScanner<InstrumentedStore<SqliteListenStore>, SpotifyClient>;

/// Open (creating and migrating if needed) the configured database
pub(crate) async fn open_store(config: &Config) -> PollerErrorResult<SqliteListenStore> {
    let database_path = config.database_path()?;
    info!("Opening database: {}", database_path.display());

    let pool = open_pool(
        &database_path,
        PoolOptions {
            max_connections: config.database.max_connections,
            busy_timeout: Duration::from_secs(config.database.busy_timeout_secs),
        },
    )
    .await?;

    Ok(SqliteListenStore::new(pool))
}

pub(crate) fn build_scanner(
    config: &Config,
    store: SqliteListenStore,
) -> PollerErrorResult<SpotifyScanner> {
    let client = SpotifyClient::new(
        &config.spotify.api_base_url,
        Duration::from_secs(config.spotify.request_timeout_secs),
    )?;

    Ok(AccountScanner::new(
        InstrumentedStore::new(store),
        client,
        ScannerConfig::from(&config.poller),
    ))
}

/// Poll until `cancel` fires. Cancellation is a clean exit.
pub(crate) async fn run_poller(
    scanner: SpotifyScanner,
    settings: PollerSettings,
    cancel: CancellationToken,
) -> PollerErrorResult<()> {
    let poller = Poller::new(scanner, settings);

    match poller.run(cancel).await {
        Err(IngestError::Cancelled { .. }) => {
            info!("Poller stopped");
            Ok(())
        }
        Err(e) => Err(e.into()),
        Ok(()) => Ok(()),
    }
}

pub(crate) async fn scan_once(
    scanner: &SpotifyScanner,
    spotify_user_id: &str,
) -> PollerErrorResult<ScanReport> {
    Ok(scanner.scan(spotify_user_id).await?)
}

pub(crate) fn read_token_file(path: &Path) -> PollerErrorResult<OAuthToken> {
    let json = std::fs::read_to_string(path).map_err(|e| PollerError::io(path, e))?;
    Ok(OAuthToken::from_json(&json)?)
}

/// Create a user and its Spotify account in one transaction.
pub(crate) async fn link_account(
    store: &SqliteListenStore,
    spotify_user_id: &str,
    credentials: OAuthToken,
) -> PollerErrorResult<Account> {
    if AccountRepository::find_by_external_id(store.pool(), Provider::Spotify, spotify_user_id)
        .await?
        .is_some()
    {
        return Err(PollerError::already_linked(spotify_user_id));
    }

    let user = User::new();
    let account = Account::new(user.id, Provider::Spotify, spotify_user_id, credentials);

    let mut tx = store.begin().await?;
    UserRepository::create(&mut *tx, &user).await?;
    AccountRepository::create(&mut *tx, &account).await?;
    store.commit(tx).await?;

    info!(
        "Linked Spotify account {} to user {} (account {})",
        spotify_user_id, user.id, account.id
    );

    Ok(account)
}
