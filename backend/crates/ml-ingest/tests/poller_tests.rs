mod common;

use common::*;

use ml_config::SweepPolicy;
use ml_db::SqliteListenStore;
use ml_ingest::{AccountScanner, IngestError, Poller, PollerSettings, ScannerConfig, SweepReport};

use std::time::Duration;

use googletest::prelude::*;
use sqlx::SqlitePool;
use tokio_util::sync::CancellationToken;

fn poller(
    pool: &SqlitePool,
    source: &ScriptedSource,
    settings: PollerSettings,
) -> Poller<SqliteListenStore, ScriptedSource> {
    let scanner = AccountScanner::new(
        SqliteListenStore::new(pool.clone()),
        source.clone(),
        ScannerConfig::default(),
    );
    Poller::new(scanner, settings)
}

fn settings(sweep_policy: SweepPolicy) -> PollerSettings {
    PollerSettings {
        interval: Duration::from_secs(60),
        sweep_policy,
    }
}

/// Two accounts swept in creation order, the first one's fetch failing.
async fn failing_first_account(pool: &SqlitePool) -> ScriptedSource {
    create_test_account_at(pool, "spotify-alice", at_millis(1_000)).await;
    create_test_account_at(pool, "spotify-bob", at_millis(2_000)).await;

    ScriptedSource::new()
        .with_failure()
        .with_batch(vec![event("B", 5_000)])
}

#[tokio::test]
async fn given_accounts_when_swept_then_each_is_scanned_once() {
    // Given
    let pool = create_test_pool().await;
    let alice = create_test_account_at(&pool, "spotify-alice", at_millis(1_000)).await;
    let bob = create_test_account_at(&pool, "spotify-bob", at_millis(2_000)).await;
    let source = ScriptedSource::new()
        .with_batch(vec![event("A", 4_000), event("B", 3_000)])
        .with_batch(vec![event("C", 5_000)]);

    // When
    let report = poller(&pool, &source, PollerSettings::default())
        .sweep()
        .await
        .unwrap();

    // Then
    assert_eq!(
        report,
        SweepReport {
            accounts: 2,
            scanned: 2,
            failed: 0,
            inserted: 3,
        }
    );
    assert_that!(listen_count(&pool, &alice).await, eq(2));
    assert_that!(listen_count(&pool, &bob).await, eq(1));
    let tokens: Vec<_> = source.calls().into_iter().map(|c| c.access_token).collect();
    assert_eq!(tokens, vec!["token-for-spotify-alice", "token-for-spotify-bob"]);
}

#[tokio::test]
async fn given_no_accounts_when_swept_then_source_is_not_called() {
    let pool = create_test_pool().await;
    let source = ScriptedSource::new();

    let report = poller(&pool, &source, PollerSettings::default())
        .sweep()
        .await
        .unwrap();

    assert_eq!(report, SweepReport::default());
    assert!(source.calls().is_empty());
}

#[tokio::test]
async fn given_fail_fast_when_account_fails_then_sweep_stops_there() {
    // Given
    let pool = create_test_pool().await;
    let source = failing_first_account(&pool).await;
    let poller = poller(&pool, &source, settings(SweepPolicy::FailFast));

    // When
    let err = poller.run(CancellationToken::new()).await.unwrap_err();

    // Then
    assert!(matches!(err, IngestError::Source { ref account_id, .. } if account_id == "spotify-alice"));
    assert_that!(source.calls().len(), eq(1));
    let bob = reload_by_id(&pool, "spotify-bob").await;
    assert_that!(listen_count(&pool, &bob).await, eq(0));
}

#[tokio::test]
async fn given_continue_on_error_when_account_fails_then_sweep_finishes() {
    // Given
    let pool = create_test_pool().await;
    let source = failing_first_account(&pool).await;
    let poller = poller(&pool, &source, settings(SweepPolicy::ContinueOnError));

    // When
    let report = poller.sweep().await.unwrap();

    // Then
    assert_that!(report.scanned, eq(1));
    assert_that!(report.failed, eq(1));
    let bob = reload_by_id(&pool, "spotify-bob").await;
    assert_that!(listen_count(&pool, &bob).await, eq(1));
    assert_eq!(bob.last_synced_at, Some(at_millis(5_000)));
}

#[tokio::test]
async fn given_cancelled_token_when_run_then_one_sweep_then_cancelled() {
    let pool = create_test_pool().await;
    create_test_account(&pool, "spotify-alice").await;
    let source = ScriptedSource::new();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = poller(&pool, &source, settings(SweepPolicy::FailFast))
        .run(cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, IngestError::Cancelled { .. }));
    assert_that!(source.calls().len(), eq(1));
}

#[tokio::test]
async fn given_poller_waiting_when_cancelled_then_returns_without_another_sweep() {
    // Given
    let pool = create_test_pool().await;
    create_test_account(&pool, "spotify-alice").await;
    let source = ScriptedSource::new();
    let poller = poller(&pool, &source, settings(SweepPolicy::FailFast));
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        trigger.cancel();
    });

    // When
    let result = tokio::time::timeout(Duration::from_secs(10), poller.run(cancel))
        .await
        .expect("poller should stop well before its 60s interval");

    // Then
    canceller.await.unwrap();
    assert!(matches!(result, Err(IngestError::Cancelled { .. })));
    assert_that!(source.calls().len(), eq(1));
}

#[tokio::test]
async fn given_short_interval_then_sweeps_repeat_until_cancelled() {
    let pool = create_test_pool().await;
    create_test_account(&pool, "spotify-alice").await;
    let source = ScriptedSource::new();
    let poller = poller(
        &pool,
        &source,
        PollerSettings {
            interval: Duration::from_millis(50),
            sweep_policy: SweepPolicy::FailFast,
        },
    );
    let cancel = CancellationToken::new();

    let watcher = {
        let source = source.clone();
        let cancel = cancel.clone();
        async move {
            while source.calls().len() < 3 {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
            cancel.cancel();
        }
    };

    let (result, ()) = tokio::join!(poller.run(cancel), watcher);

    assert!(matches!(result, Err(IngestError::Cancelled { .. })));
    assert_that!(source.calls().len(), ge(3));
}

async fn reload_by_id(pool: &SqlitePool, external_account_id: &str) -> ml_core::Account {
    ml_db::AccountRepository::find_by_external_id(pool, ml_core::Provider::Spotify, external_account_id)
        .await
        .unwrap()
        .unwrap()
}
