//! Background tasks spawned by the application loop.

use crate::catalog::PackCatalog;
use crate::error::Result;
use crate::list::SelectableEntry;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Outcome of one catalog scan
pub type ScanOutcome = Result<Vec<SelectableEntry>>;

/// Scan the catalog on the runtime and post the outcome to the render loop.
pub fn spawn_catalog_scan(
    catalog: Arc<PackCatalog>,
    tx: UnboundedSender<ScanOutcome>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let outcome = catalog.scan_entries().await;
        if tx.send(outcome).is_err() {
            log::debug!("render loop gone before catalog scan finished");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ICON_MAP_RESOURCE, MANIFEST_FILE};
    use crate::error::PickerError;
    use tempfile::TempDir;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_scan_outcome_is_posted() {
        let root = TempDir::new().unwrap();
        let pack = root.path().join("pebble");
        std::fs::create_dir_all(&pack).unwrap();
        std::fs::write(pack.join(MANIFEST_FILE), "id = \"org.pebble\"").unwrap();
        std::fs::write(pack.join(ICON_MAP_RESOURCE), "<icons/>").unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_catalog_scan(Arc::new(PackCatalog::new(root.path())), tx)
            .await
            .unwrap();

        let entries = rx.recv().await.unwrap().unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_scan_failure_is_posted() {
        let root = TempDir::new().unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_catalog_scan(Arc::new(PackCatalog::new(root.path().join("gone"))), tx)
            .await
            .unwrap();

        assert!(matches!(
            rx.recv().await.unwrap(),
            Err(PickerError::CatalogUnavailable { .. })
        ));
    }
}
