//! Periodic removal of dead ledger entries.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use super::ledger::RevocationLedger;

/// Background task purging expired revocations on a fixed interval.
///
/// Correctness never depends on this running; it only bounds ledger growth.
#[derive(Debug, Clone)]
pub struct LedgerPurger {
    ledger: RevocationLedger,
    interval: Duration,
}

impl LedgerPurger {
    /// Creates a purger. An `interval` of zero disables [`Self::spawn`].
    pub fn new(ledger: RevocationLedger, interval: Duration) -> Self {
        Self { ledger, interval }
    }

    /// Runs a single purge cycle, returning the number of entries removed.
    /// Failures are logged, not propagated.
    pub async fn run_once(&self) -> u64 {
        match self.ledger.purge_expired().await {
            Ok(purged) => {
                if purged > 0 {
                    info!(purged, "Purged expired revocations");
                }
                purged
            }
            Err(e) => {
                error!(error = %e, "Revocation purge failed");
                0
            }
        }
    }

    /// Spawns the purge loop. It exits when `shutdown` flips to `true` or its
    /// sender is dropped.
    pub fn spawn(self, mut shutdown: watch::Receiver<bool>) -> Option<JoinHandle<()>> {
        if self.interval.is_zero() {
            info!("Revocation purge disabled");
            return None;
        }

        info!(
            interval_seconds = self.interval.as_secs(),
            "Starting revocation purge task"
        );

        Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        self.run_once().await;
                    }
                    changed = shutdown.changed() => {
                        if changed.is_err() || *shutdown.borrow() {
                            break;
                        }
                    }
                }
            }

            info!("Revocation purge task stopped");
        }))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::{Duration as ChronoDuration, Utc};
    use condohub_database::memory::MemoryRevocationStore;
    use condohub_entity::revocation::TokenFingerprint;

    fn purger(store: &MemoryRevocationStore, interval: Duration) -> LedgerPurger {
        let ledger = RevocationLedger::new(Arc::new(store.clone()), Duration::from_secs(1));
        LedgerPurger::new(ledger, interval)
    }

    #[tokio::test]
    async fn test_run_once_counts_removed_entries() {
        let store = MemoryRevocationStore::new();
        let ledger = RevocationLedger::new(Arc::new(store.clone()), Duration::from_secs(1));
        ledger
            .revoke(
                &TokenFingerprint::from_hex("old"),
                Utc::now() - ChronoDuration::minutes(5),
            )
            .await
            .unwrap();

        assert_eq!(purger(&store, Duration::from_secs(60)).run_once().await, 1);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_zero_interval_disables_task() {
        let store = MemoryRevocationStore::new();
        let (_tx, rx) = watch::channel(false);
        assert!(purger(&store, Duration::ZERO).spawn(rx).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_loop_purges_on_tick_and_stops_on_shutdown() {
        let store = MemoryRevocationStore::new();
        let ledger = RevocationLedger::new(Arc::new(store.clone()), Duration::from_secs(1));
        ledger
            .revoke(
                &TokenFingerprint::from_hex("old"),
                Utc::now() - ChronoDuration::minutes(5),
            )
            .await
            .unwrap();

        let (tx, rx) = watch::channel(false);
        let handle = purger(&store, Duration::from_secs(60)).spawn(rx).unwrap();

        tokio::time::sleep(Duration::from_secs(61)).await;
        assert!(store.is_empty());

        tx.send(true).unwrap();
        handle.await.unwrap();
    }
}
