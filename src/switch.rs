//! Themed icon feature switch.
//!
//! The launcher only re-reads the icon pack when the themed icon feature flips,
//! so a changed selection is announced by switching it off and back on. That is
//! the default [`IconSwitch::refresh`]; a switch with a direct refresh signal can
//! override it.

use crate::error::Result;
use crate::store::{KeyValueStore, StoreRow, StoreUri, RESULT_SUCCESS};
use async_trait::async_trait;
use std::sync::Arc;

/// Store path holding the feature flag row
pub const KEY_THEMED_ICON_ENABLED: &str = "themed_icon_enabled";
/// Column holding `"1"` or `"0"`
pub const KEY_ENABLED: &str = "enabled";

/// Dependent feature flag toggled whenever the selected pack changes.
#[async_trait]
pub trait IconSwitch: Send + Sync {
    /// Whether themed icons are supported at all
    fn is_available(&self) -> bool;

    async fn set_enabled(&self, enabled: bool) -> Result<()>;

    /// Make consumers pick up `id` as the active pack
    async fn refresh(&self, id: Option<&str>) -> Result<()> {
        self.set_enabled(false).await?;
        self.set_enabled(id.is_some()).await
    }
}

/// Switch persisted as a row in the same key-value store as the selection.
pub struct StoreSwitch {
    store: Arc<dyn KeyValueStore>,
    uri: StoreUri,
    available: bool,
}

impl StoreSwitch {
    pub fn new(store: Arc<dyn KeyValueStore>, authority: &str, available: bool) -> Self {
        Self {
            store,
            uri: StoreUri::for_path(authority, KEY_THEMED_ICON_ENABLED),
            available,
        }
    }

    /// Read the persisted flag; an absent row reads as disabled
    pub async fn is_enabled(&self) -> Result<bool> {
        let rows = self.store.query(&self.uri).await?;
        Ok(rows
            .first()
            .and_then(|row| row.get(KEY_ENABLED))
            .map(|value| value == "1")
            .unwrap_or(false))
    }
}

#[async_trait]
impl IconSwitch for StoreSwitch {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn set_enabled(&self, enabled: bool) -> Result<()> {
        let value = if enabled { "1" } else { "0" };
        let touched = self
            .store
            .update(&self.uri, StoreRow::new().with(KEY_ENABLED, Some(value)))
            .await?;
        if touched != RESULT_SUCCESS {
            log::warn!("themed icon switch update touched {touched} rows");
        }
        log::debug!("themed icons {}", if enabled { "enabled" } else { "disabled" });
        Ok(())
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use parking_lot::Mutex;

    /// Switch that records every transition, for asserting the toggle sequence
    #[derive(Default)]
    pub struct RecordingSwitch {
        pub available: bool,
        pub transitions: Mutex<Vec<bool>>,
    }

    impl RecordingSwitch {
        pub fn available() -> Self {
            Self {
                available: true,
                transitions: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl IconSwitch for RecordingSwitch {
        fn is_available(&self) -> bool {
            self.available
        }

        async fn set_enabled(&self, enabled: bool) -> Result<()> {
            self.transitions.lock().push(enabled);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_default_refresh_toggles_off_then_on() {
        let switch = RecordingSwitch::available();
        switch.refresh(Some("com.a")).await.unwrap();
        assert_eq!(*switch.transitions.lock(), vec![false, true]);
    }

    #[tokio::test]
    async fn test_refresh_to_system_icons_leaves_switch_off() {
        let switch = RecordingSwitch::available();
        switch.refresh(None).await.unwrap();
        assert_eq!(*switch.transitions.lock(), vec![false, false]);
    }

    #[tokio::test]
    async fn test_store_switch_persists_flag() {
        let store = Arc::new(InMemoryStore::new());
        let switch = StoreSwitch::new(store.clone(), "test.authority", true);

        assert!(!switch.is_enabled().await.unwrap());
        switch.refresh(Some("com.a")).await.unwrap();
        assert!(switch.is_enabled().await.unwrap());

        let row = store
            .row(&StoreUri::for_path("test.authority", KEY_THEMED_ICON_ENABLED))
            .unwrap();
        assert_eq!(row.get(KEY_ENABLED), Some("1"));
    }
}
