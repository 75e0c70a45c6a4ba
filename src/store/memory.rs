//! In-memory store backend.
//!
//! Keeps every row in a map behind a `parking_lot` lock. Used by tests and by the
//! binary when no store file is configured.

use crate::error::Result;
use crate::store::backend::{KeyValueStore, StoreRow, StoreUri, RESULT_SUCCESS};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct InMemoryStore {
    rows: RwLock<HashMap<StoreUri, StoreRow>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a row before handing the store out
    pub fn with_row(self, uri: StoreUri, row: StoreRow) -> Self {
        self.rows.write().insert(uri, row);
        self
    }

    /// Current contents of the row at `uri`, if any
    pub fn row(&self, uri: &StoreUri) -> Option<StoreRow> {
        self.rows.read().get(uri).cloned()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn query(&self, uri: &StoreUri) -> Result<Vec<StoreRow>> {
        Ok(self.rows.read().get(uri).cloned().into_iter().collect())
    }

    async fn update(&self, uri: &StoreUri, values: StoreRow) -> Result<usize> {
        self.rows
            .write()
            .entry(uri.clone())
            .or_default()
            .merge(values);
        Ok(RESULT_SUCCESS)
    }
}
