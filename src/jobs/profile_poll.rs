//! Profile poll job
//!
//! Fetches the profile snapshot on a fixed interval and hands each outcome to
//! the dashboard state. Runs until shut down through its [`PollHandle`] (or
//! until the handle is dropped).

use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Duration, MissedTickBehavior, interval};

use crate::dashboard::state::{DashboardHandle, StateEvent};
use crate::services::profile_feed::ProfileSource;

pub struct PollHandle {
    shutdown_tx: watch::Sender<bool>,
    refresh_tx: mpsc::Sender<()>,
    join: JoinHandle<()>,
}

impl PollHandle {
    /// Ask for an immediate fetch. Returns false if one is already queued.
    pub fn refresh(&self) -> bool {
        self.refresh_tx.try_send(()).is_ok()
    }

    /// Stop polling and wait for the task to exit. A fetch in flight is
    /// dropped and its result never reaches the dashboard.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        if let Err(e) = self.join.await {
            tracing::error!("Profile poll task ended abnormally: {}", e);
        }
    }
}

pub fn start_profile_poll_job(
    source: Arc<dyn ProfileSource>,
    dashboard: DashboardHandle,
    every: Duration,
) -> PollHandle {
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let (refresh_tx, mut refresh_rx) = mpsc::channel::<()>(1);

    let join = tokio::spawn(async move {
        tracing::info!("Starting profile polling (every {} seconds)", every.as_secs());

        // First tick fires immediately. Each fetch completes before the next
        // tick is awaited, so requests never overlap.
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    tracing::debug!("Scheduled profile refresh");
                }
                Some(()) = refresh_rx.recv() => {
                    tracing::info!("Manual profile refresh requested");
                    ticker.reset();
                }
                _ = shutdown_rx.changed() => break,
            }

            if !poll_once(source.as_ref(), &dashboard, &mut shutdown_rx).await {
                break;
            }
        }

        tracing::info!("Profile polling stopped");
    });

    PollHandle {
        shutdown_tx,
        refresh_tx,
        join,
    }
}

/// One fetch. Returns false when shutdown was signalled meanwhile.
async fn poll_once(
    source: &dyn ProfileSource,
    dashboard: &DashboardHandle,
    shutdown_rx: &mut watch::Receiver<bool>,
) -> bool {
    dashboard.begin_fetch();

    let result = tokio::select! {
        result = source.fetch_profiles() => result,
        _ = shutdown_rx.changed() => {
            tracing::debug!("Shutdown during fetch, discarding in-flight request");
            return false;
        }
    };

    if *shutdown_rx.borrow() {
        return false;
    }

    match dashboard.apply_fetch_result(result) {
        StateEvent::SnapshotReplaced { count } => {
            tracing::info!("Profile snapshot replaced ({} profiles)", count);
        }
        StateEvent::FetchFailed(e) => {
            tracing::warn!("Profile fetch failed, keeping previous snapshot: {}", e);
        }
        _ => {}
    }
    true
}
