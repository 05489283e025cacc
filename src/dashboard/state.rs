//! Dashboard application state
//!
//! All view state lives in [`DashboardState`] and only changes through its
//! transition functions. The poll job is the only writer of the profile
//! snapshot; user commands only touch the filter.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::dashboard::view::{ProfileRow, Summary};
use crate::models::{filter::FilterSpec, profile::Profile};
use crate::services::{evaluator::evaluate, profile_feed::FetchError};

/// Change notifications for renderers
#[derive(Debug, Clone, PartialEq)]
pub enum StateEvent {
    FetchStarted,
    SnapshotReplaced { count: usize },
    FetchFailed(FetchError),
    FilterChanged,
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    profiles: Arc<Vec<Profile>>,
    filter: FilterSpec,
    loading: bool,
    error: Option<FetchError>,
    last_updated: Option<DateTime<Utc>>,
    fetch_count: u64,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(FilterSpec::default())
    }
}

impl DashboardState {
    pub fn new(filter: FilterSpec) -> Self {
        Self {
            profiles: Arc::new(Vec::new()),
            filter,
            // Nothing has been fetched yet
            loading: true,
            error: None,
            last_updated: None,
            fetch_count: 0,
        }
    }

    pub fn begin_fetch(&mut self) {
        self.loading = true;
    }

    /// Apply the outcome of one fetch.
    ///
    /// Success swaps in the new snapshot and clears the error. Failure keeps
    /// the previous snapshot untouched and records the error.
    pub fn apply_fetch_result(
        &mut self,
        result: Result<Vec<Profile>, FetchError>,
        now: DateTime<Utc>,
    ) -> StateEvent {
        self.loading = false;
        match result {
            Ok(profiles) => {
                let count = profiles.len();
                self.profiles = Arc::new(profiles);
                self.error = None;
                self.last_updated = Some(now);
                self.fetch_count += 1;
                StateEvent::SnapshotReplaced { count }
            }
            Err(e) => {
                self.error = Some(e.clone());
                StateEvent::FetchFailed(e)
            }
        }
    }

    /// Replace the filter. Invalid specs are rejected and the current one kept.
    pub fn update_filter_spec(&mut self, spec: FilterSpec) -> Result<(), String> {
        spec.validate()?;
        self.filter = spec;
        Ok(())
    }

    pub fn profiles(&self) -> Arc<Vec<Profile>> {
        Arc::clone(&self.profiles)
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    pub fn fetch_count(&self) -> u64 {
        self.fetch_count
    }

    /// Filtered and sorted subset of the current snapshot
    pub fn visible_profiles(&self) -> Vec<Profile> {
        evaluate(&self.profiles, &self.filter)
    }

    pub fn visible_rows(&self, now: DateTime<Utc>) -> Vec<ProfileRow> {
        self.visible_profiles()
            .iter()
            .enumerate()
            .map(|(i, p)| ProfileRow::from_profile(p, i, now))
            .collect()
    }

    pub fn summary(&self, rows: &[ProfileRow]) -> Summary {
        Summary::from_rows(rows, self.profiles.len())
    }
}

/// Shared handle to the dashboard state with change notifications
#[derive(Clone)]
pub struct DashboardHandle {
    state: Arc<RwLock<DashboardState>>,
    update_tx: broadcast::Sender<StateEvent>,
}

impl Default for DashboardHandle {
    fn default() -> Self {
        Self::new(DashboardState::default())
    }
}

impl DashboardHandle {
    pub fn new(state: DashboardState) -> Self {
        let (update_tx, _) = broadcast::channel(64);
        Self {
            state: Arc::new(RwLock::new(state)),
            update_tx,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StateEvent> {
        self.update_tx.subscribe()
    }

    /// Cheap copy of the current state; the profile list is shared
    pub fn snapshot(&self) -> DashboardState {
        self.state.read().clone()
    }

    pub fn begin_fetch(&self) {
        self.state.write().begin_fetch();
        self.notify(StateEvent::FetchStarted);
    }

    pub fn apply_fetch_result(&self, result: Result<Vec<Profile>, FetchError>) -> StateEvent {
        let event = self.state.write().apply_fetch_result(result, Utc::now());
        self.notify(event.clone());
        event
    }

    /// Edit the filter in place; the edit is discarded if it fails validation
    pub fn update_filter<F>(&self, edit: F) -> Result<(), String>
    where
        F: FnOnce(&mut FilterSpec),
    {
        {
            let mut state = self.state.write();
            let mut spec = state.filter().clone();
            edit(&mut spec);
            state.update_filter_spec(spec)?;
        }
        self.notify(StateEvent::FilterChanged);
        Ok(())
    }

    fn notify(&self, event: StateEvent) {
        // No subscribers is fine
        let _ = self.update_tx.send(event);
    }
}
