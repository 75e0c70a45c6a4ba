//! TOML-file store backend.
//!
//! Each uri becomes a table in a single TOML document:
//!
//! ```toml
//! ["content://iconpack.settings/themed_icon_pack"]
//! name = "org.example.pebble"
//! ```
//!
//! TOML has no null, so a column set to `None` is simply absent from its table.
//! A table whose name is not a `content://` uri makes the whole file unreadable.
//! File I/O runs on the blocking pool and every write replaces the file
//! atomically through a sibling temp file.

use crate::error::{PickerError, Result};
use crate::store::backend::{KeyValueStore, StoreRow, StoreUri, RESULT_SUCCESS};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;

type Document = BTreeMap<String, BTreeMap<String, String>>;

#[derive(Debug, Clone)]
pub struct TomlFileStore {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl TomlFileStore {
    /// Open a store backed by `path`. The file is created lazily on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(Inner {
                path: path.into(),
                write_lock: Mutex::new(()),
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.inner.path
    }
}

impl Inner {
    fn load(&self) -> Result<Document> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Document::new()),
            Err(err) => {
                return Err(PickerError::file_error(
                    format!("failed to read store {}", self.path.display()),
                    err,
                ))
            }
        };

        let document: Document =
            toml::from_str(&contents).map_err(|err| PickerError::MalformedStore {
                path: self.path.clone(),
                message: err.to_string(),
            })?;

        // every table must be addressed by a well-formed uri
        for key in document.keys() {
            StoreUri::parse(key)?;
        }
        Ok(document)
    }

    fn save(&self, document: &Document) -> Result<()> {
        let serialized = toml::to_string(document).map_err(|err| PickerError::MalformedStore {
            path: self.path.clone(),
            message: err.to_string(),
        })?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)
            .map_err(|err| PickerError::file_error("failed to create store directory", err))?;

        let mut temp = NamedTempFile::new_in(&dir)
            .map_err(|err| PickerError::file_error("failed to create temp store file", err))?;
        temp.write_all(serialized.as_bytes())
            .map_err(|err| PickerError::file_error("failed to write store", err))?;
        temp.persist(&self.path)
            .map_err(|err| PickerError::file_error("failed to replace store file", err.error))?;
        Ok(())
    }

    fn query(&self, uri: &StoreUri) -> Result<Vec<StoreRow>> {
        let document = self.load()?;
        let rows = document
            .get(&uri.to_string())
            .map(|table| {
                table
                    .iter()
                    .fold(StoreRow::new(), |row, (column, value)| {
                        row.with(column.as_str(), Some(value.as_str()))
                    })
            })
            .into_iter()
            .collect();
        Ok(rows)
    }

    fn update(&self, uri: &StoreUri, values: StoreRow) -> Result<usize> {
        let _guard = self.write_lock.lock();
        let mut document = self.load()?;

        let table = document.entry(uri.to_string()).or_default();
        for (column, value) in values.columns() {
            match value {
                Some(value) => {
                    table.insert(column.to_string(), value.to_string());
                }
                None => {
                    table.remove(column);
                }
            }
        }

        self.save(&document)?;
        Ok(RESULT_SUCCESS)
    }
}

#[async_trait]
impl KeyValueStore for TomlFileStore {
    async fn query(&self, uri: &StoreUri) -> Result<Vec<StoreRow>> {
        let inner = Arc::clone(&self.inner);
        let uri = uri.clone();
        tokio::task::spawn_blocking(move || inner.query(&uri)).await?
    }

    async fn update(&self, uri: &StoreUri, values: StoreRow) -> Result<usize> {
        let inner = Arc::clone(&self.inner);
        let uri = uri.clone();
        tokio::task::spawn_blocking(move || inner.update(&uri, values)).await?
    }
}
