//! Key-value persistence seam.
//!
//! The engine persists three logical records: the cart snapshot, the order
//! log, and the last known customer email. Records are serialized JSON
//! strings; a malformed or absent record is treated as empty, never as an
//! error. Writes happen after every mutation and are best-effort - the shop
//! logs failures and carries on.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use thiserror::Error;

/// Persisted record keys.
pub mod keys {
    pub const CART: &str = "cart";
    pub const ORDERS: &str = "orders";
    pub const LAST_CUSTOMER_EMAIL: &str = "last_customer_email";
}

/// Errors writing to the backing store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A minimal key-value store collaborator.
pub trait KvStore {
    /// Read a record. `None` covers both "never written" and "unreadable";
    /// callers treat either as empty.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a record.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing medium rejects the write.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store. Clones share the same map, so a clone handed to the shop
/// can be inspected through the original (the unit and scenario tests rely
/// on this).
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records, for exact-state assertions.
    #[must_use]
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.records.borrow().clone()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.records.borrow().get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.records
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed store keeping one `<key>.json` file per record under a data
/// directory. This is the durable analog of the browser's local storage.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// The data directory this store writes to.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl KvStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.record_path(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::write(self.record_path(key), value)?;
        Ok(())
    }
}
