//! Core store abstraction.
//!
//! This module defines the [`KeyValueStore`] trait together with the uri and row
//! value types every backend shares. A path holds at most one row; a row is a
//! set of nullable string columns.

use crate::error::{PickerError, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fmt;

/// Row count a successful update reports.
pub const RESULT_SUCCESS: usize = 1;

const SCHEME: &str = "content://";

/// Address of a single logical row: `content://<authority>/<path>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StoreUri {
    authority: String,
    path: String,
}

impl StoreUri {
    /// Build the uri for `path` under the given provider authority
    pub fn for_path(authority: impl Into<String>, path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            authority: authority.into(),
            path: path.trim_matches('/').to_string(),
        }
    }

    /// Parse a `content://authority/path` string
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = || PickerError::InvalidUri {
            uri: raw.to_string(),
        };

        let rest = raw.strip_prefix(SCHEME).ok_or_else(invalid)?;
        let (authority, path) = rest.split_once('/').ok_or_else(invalid)?;
        if authority.is_empty() || path.trim_matches('/').is_empty() {
            return Err(invalid());
        }

        Ok(Self::for_path(authority, path))
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for StoreUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}/{}", SCHEME, self.authority, self.path)
    }
}

/// One row of nullable string columns.
///
/// A column present with `None` and an absent column read the same way; the
/// distinction only matters to backends that want to keep explicit nulls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreRow {
    columns: BTreeMap<String, Option<String>>,
}

impl StoreRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style column assignment
    pub fn with(mut self, column: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        self.set(column, value.map(Into::into));
        self
    }

    pub fn set(&mut self, column: impl Into<String>, value: Option<String>) {
        self.columns.insert(column.into(), value);
    }

    /// Read a column, flattening "absent" and "null" into `None`
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns.get(column).and_then(|value| value.as_deref())
    }

    /// Overlay `other` onto this row, column by column
    pub fn merge(&mut self, other: StoreRow) {
        self.columns.extend(other.columns);
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.columns
            .iter()
            .map(|(column, value)| (column.as_str(), value.as_deref()))
    }
}

/// Key-value-by-uri persistence service.
///
/// Implementations must be thread-safe; the selection manager calls them from
/// spawned tasks.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Return the rows stored at `uri` (zero or one for every path this crate uses)
    async fn query(&self, uri: &StoreUri) -> Result<Vec<StoreRow>>;

    /// Upsert `values` into the row at `uri`, returning the number of rows touched
    ///
    /// Callers treat anything other than [`RESULT_SUCCESS`] as a failed write.
    async fn update(&self, uri: &StoreUri, values: StoreRow) -> Result<usize>;
}
