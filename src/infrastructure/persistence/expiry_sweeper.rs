//! Background removal of expired records.
//!
//! PostgreSQL has no native per-row TTL, so this task plays that role for
//! [`PgRecordRepository`]. Resolution never consults expiry itself; a record
//! stays resolvable until the sweeper removes it.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

use super::PgRecordRepository;

/// Runs the sweeper until the process exits.
///
/// A failed sweep is logged and retried on the next tick.
pub async fn run_expiry_sweeper(repository: Arc<PgRecordRepository>, every: Duration) {
    let mut ticker = interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!("Expiry sweeper started (interval: {}s)", every.as_secs());

    loop {
        ticker.tick().await;

        match repository.purge_expired().await {
            Ok(0) => debug!("Expiry sweep: nothing to remove"),
            Ok(removed) => {
                metrics::counter!("shortlink_records_expired_total").increment(removed);
                info!("Expiry sweep removed {} record(s)", removed);
            }
            Err(e) => warn!("Expiry sweep failed: {}", e),
        }
    }
}
