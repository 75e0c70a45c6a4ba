//! Lock-guarded selection cell with background load and persistence.
//!
//! The lock only ever covers the in-memory read or write of the current id.
//! Store I/O runs in spawned tasks outside the critical section and re-enters
//! it to publish the result. A background fetch and a user selection therefore
//! race with last-write-wins semantics; a user choice that lands after the
//! fetch supersedes it, and one that lands before is overwritten by the fetch.
//!
//! Writes to the store are serialized and stamped with a generation. A write
//! whose selection has already been superseded is skipped, so the store and the
//! icon switch always end on the most recent user choice.

use crate::selection::snapshot::SavedState;
use crate::selection::summary::{format_summary, LabelResolver};
use crate::store::{KeyValueStore, StoreRow, StoreUri, RESULT_SUCCESS};
use crate::switch::IconSwitch;
use log::{debug, error, warn};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tokio::task::JoinHandle;

/// Store path of the selected pack row
pub const KEY_THEMED_ICON_PACK: &str = "themed_icon_pack";
/// Column holding the selected pack id (null for system icons)
pub const KEY_NAME: &str = "name";

/// Owner of the currently selected icon pack id.
///
/// Cloning yields another handle to the same state. Background fetches hold only
/// a weak reference, so once every handle is dropped a late fetch result is
/// discarded instead of written.
#[derive(Clone)]
pub struct SelectionManager {
    shared: Arc<Shared>,
}

struct Shared {
    store: Arc<dyn KeyValueStore>,
    switch: Arc<dyn IconSwitch>,
    uri: StoreUri,
    current_id: Mutex<Option<String>>,
    /// Bumped under the `current_id` lock on every user selection
    generation: AtomicU64,
    /// Held across a store write and the switch refresh that follows it
    persist_lock: tokio::sync::Mutex<()>,
}

impl SelectionManager {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        switch: Arc<dyn IconSwitch>,
        authority: &str,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                store,
                switch,
                uri: StoreUri::for_path(authority, KEY_THEMED_ICON_PACK),
                current_id: Mutex::new(None),
                generation: AtomicU64::new(0),
                persist_lock: tokio::sync::Mutex::new(()),
            }),
        }
    }

    /// Seed the selection.
    ///
    /// A restored id is adopted as-is and nothing is fetched. Otherwise, when
    /// themed icons are available, the persisted id is loaded in the background
    /// and the returned handle completes once it has been published.
    ///
    /// Must be called from within a tokio runtime.
    pub fn initialize(&self, restored: Option<String>) -> Option<JoinHandle<()>> {
        if let Some(id) = restored {
            debug!("restored themed icon pack {id}");
            *self.shared.current_id.lock() = Some(id);
            return None;
        }

        if !self.is_available() {
            debug!("themed icons unavailable, skipping fetch");
            return None;
        }

        let weak: Weak<Shared> = Arc::downgrade(&self.shared);
        let store = Arc::clone(&self.shared.store);
        let uri = self.shared.uri.clone();

        Some(tokio::spawn(async move {
            if weak.strong_count() == 0 {
                return;
            }

            let fetched = fetch_persisted(store.as_ref(), &uri).await;

            match weak.upgrade() {
                Some(shared) => {
                    debug!("loaded themed icon pack {fetched:?}");
                    *shared.current_id.lock() = fetched;
                }
                None => debug!("selection dropped before fetch completed"),
            }
        }))
    }

    /// Query the store for the persisted id without touching the in-memory state
    pub async fn fetch_persisted(&self) -> Option<String> {
        fetch_persisted(self.shared.store.as_ref(), &self.shared.uri).await
    }

    /// Snapshot of the current id
    pub fn current(&self) -> Option<String> {
        self.shared.current_id.lock().clone()
    }

    /// Record a user choice, then persist it and refresh the icon switch.
    ///
    /// The in-memory value is updated before this returns. Persistence failures
    /// are logged and never roll the selection back. The switch is refreshed
    /// whether or not the write succeeded.
    ///
    /// When several selections are in flight, only the latest one is guaranteed
    /// to reach the store; the returned handle of a superseded selection
    /// completes without writing.
    pub fn select(&self, id: Option<String>) -> JoinHandle<()> {
        let generation = {
            let mut current = self.shared.current_id.lock();
            *current = id.clone();
            self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1
        };
        debug!("selected themed icon pack {id:?}");

        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            let _persisting = shared.persist_lock.lock().await;
            if shared.generation.load(Ordering::SeqCst) != generation {
                debug!("skipping superseded write of {id:?}");
                return;
            }

            save_package(shared.store.as_ref(), &shared.uri, id.as_deref()).await;
            if let Err(err) = shared.switch.refresh(id.as_deref()).await {
                error!("Failed to refresh themed icons: {err}");
            }
        })
    }

    /// Capture the selection for transient state preservation
    pub fn snapshot_for_save(&self) -> SavedState {
        SavedState {
            themed_icon_pack: self.current(),
        }
    }

    /// Summary line for the current selection
    pub fn summary(&self, resolver: &dyn LabelResolver) -> String {
        let current = self.current();
        format_summary(current.as_deref(), resolver)
    }

    pub fn is_available(&self) -> bool {
        self.shared.switch.is_available()
    }
}

async fn fetch_persisted(store: &dyn KeyValueStore, uri: &StoreUri) -> Option<String> {
    match store.query(uri).await {
        Ok(rows) => rows
            .into_iter()
            .next()
            .and_then(|row| row.get(KEY_NAME).map(str::to_string)),
        Err(err) => {
            warn!("failed to query {uri}: {err}");
            None
        }
    }
}

async fn save_package(store: &dyn KeyValueStore, uri: &StoreUri, id: Option<&str>) {
    let values = StoreRow::new().with(KEY_NAME, id);
    match store.update(uri, values).await {
        Ok(RESULT_SUCCESS) => debug!("persisted themed icon pack {id:?}"),
        Ok(touched) => error!("Failed to update themed icon pack ({touched} rows touched)"),
        Err(err) => error!("Failed to update themed icon pack: {err}"),
    }
}
