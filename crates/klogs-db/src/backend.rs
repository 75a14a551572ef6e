//! Blob storage backends.

use crate::error::{Error, Result};
use crate::models::StoredBlob;
use native_db::*;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

// Static models for the database
static MODELS: LazyLock<Models> = LazyLock::new(|| {
    let mut models = Models::new();
    models.define::<StoredBlob>().unwrap();
    models
});

/// Raw key-value storage underneath a [`Store`](crate::Store).
///
/// Keys are collection keys; values are opaque serialized blobs.
pub trait Backend {
    /// Read the blob stored under `key`.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Overwrite the blob stored under `key`.
    fn write(&self, key: &str, data: Vec<u8>) -> Result<()>;

    /// Remove the blob stored under `key`, if any.
    fn remove(&self, key: &str) -> Result<()>;

    /// All keys beginning with `prefix`, in ascending order.
    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>>;
}

/// Backend on a native_db database.
pub struct NativeBackend {
    db: Database<'static>,
}

impl NativeBackend {
    /// Open or create a database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = Builder::new()
            .create(&MODELS, path.as_ref())
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(Self { db })
    }

    /// Create an in-memory database.
    pub fn in_memory() -> Result<Self> {
        let db = Builder::new()
            .create_in_memory(&MODELS)
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(Self { db })
    }
}

impl Backend for NativeBackend {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let r = self.db.r_transaction()?;
        let stored: Option<StoredBlob> = r.get().primary(key.to_string())?;
        Ok(stored.map(|s| s.data))
    }

    fn write(&self, key: &str, data: Vec<u8>) -> Result<()> {
        let rw = self.db.rw_transaction()?;
        rw.upsert(StoredBlob::new(key, data))?;
        rw.commit()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let rw = self.db.rw_transaction()?;
        let stored: Option<StoredBlob> = rw.get().primary(key.to_string())?;
        if let Some(s) = stored {
            rw.remove(s)?;
        }
        rw.commit()?;
        Ok(())
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().primary::<StoredBlob>()?;
        let iter = scan.start_with(prefix.to_string())?;
        let blobs: std::result::Result<Vec<StoredBlob>, _> = iter.collect();
        let blobs = blobs.map_err(|e| Error::Database(e.to_string()))?;
        Ok(blobs.into_iter().map(|b| b.key).collect())
    }
}

impl From<native_db::db_type::Error> for Error {
    fn from(err: native_db::db_type::Error) -> Self {
        Error::Database(err.to_string())
    }
}

/// Backend holding blobs in process memory.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    blobs: RefCell<BTreeMap<String, Vec<u8>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Backend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.blobs.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, data: Vec<u8>) -> Result<()> {
        self.blobs.borrow_mut().insert(key.to_string(), data);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.blobs.borrow_mut().remove(key);
        Ok(())
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        Ok(self
            .blobs
            .borrow()
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, _)| k.clone())
            .collect())
    }
}
