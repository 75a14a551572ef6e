//! Typed record store.

use crate::backend::{Backend, MemoryBackend, NativeBackend};
use crate::config::{Retention, StoreConfig};
use crate::error::{Error, Result};
use klogs_core::{Collection, Insertion, Record, RecordId};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use tracing::{debug, warn};

/// Prefix of the keys holding copies of blobs that could not be decoded.
pub const UNREADABLE_PREFIX: &str = "unreadable_";

/// Record store over a blob backend.
///
/// Each operation is a single read-modify-write of one collection key.
/// A blob that cannot be decoded is treated as an empty collection. Before
/// such a blob is overwritten, its bytes are copied under
/// [`UNREADABLE_PREFIX`].
pub struct Store<B: Backend> {
    backend: B,
    config: StoreConfig,
}

impl Store<NativeBackend> {
    /// Open or create a database-backed store at the given path.
    pub fn open(path: impl AsRef<Path>, config: StoreConfig) -> Result<Self> {
        Ok(Self::new(NativeBackend::open(path)?, config))
    }
}

impl Store<MemoryBackend> {
    /// Create an empty in-memory store with the default configuration.
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new(), StoreConfig::default())
    }
}

impl<B: Backend> Store<B> {
    pub fn new(backend: B, config: StoreConfig) -> Self {
        Self { backend, config }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// All records of a collection, in stored order.
    pub fn get_all<T: Record>(&self) -> Result<Vec<T>> {
        Ok(self.decode(T::COLLECTION.key())?.unwrap_or_default())
    }

    /// Insert a record and apply the collection's retention.
    pub fn append<T: Record>(&self, record: T) -> Result<()> {
        let collection = T::COLLECTION;
        let mut records: Vec<T> = self.decode_for_update(collection.key())?.unwrap_or_default();
        let insertion = collection.insertion();
        match insertion {
            Insertion::NewestFirst => records.insert(0, record),
            Insertion::OldestFirst => records.push(record),
        }

        if let Retention::KeepLatest(limit) = self.config.retention.for_collection(collection) {
            if records.len() > limit {
                let evicted = records.len() - limit;
                match insertion {
                    Insertion::NewestFirst => records.truncate(limit),
                    Insertion::OldestFirst => {
                        records.drain(..evicted);
                    }
                }
                warn!(%collection, evicted, limit, "evicted records past retention");
            }
        }

        self.encode(collection.key(), &records)?;
        debug!(%collection, len = records.len(), "appended record");
        Ok(())
    }

    /// Remove the record with the given ID. Returns whether one was removed.
    pub fn delete_by_id<T: Record>(&self, id: &RecordId) -> Result<bool> {
        let collection = T::COLLECTION;
        let mut records: Vec<T> = self.get_all()?;
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Ok(false);
        }
        self.encode(collection.key(), &records)?;
        debug!(%collection, %id, "deleted record");
        Ok(true)
    }

    /// Overwrite one entry of a keyed collection.
    pub fn put<T: Serialize + DeserializeOwned>(
        &self,
        collection: Collection,
        key: impl fmt::Display,
        value: &T,
    ) -> Result<()> {
        let key = collection.keyed(key);
        self.decode_for_update::<T>(&key)?;
        self.encode(&key, value)?;
        debug!(%collection, key = %key, "stored keyed entry");
        Ok(())
    }

    /// Read one entry of a keyed collection.
    pub fn get<T: DeserializeOwned>(&self, collection: Collection, key: impl fmt::Display) -> Result<Option<T>> {
        self.decode(&collection.keyed(key))
    }

    /// All entries of a keyed collection, in ascending key order.
    pub fn get_keyed<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>> {
        let prefix = format!("{}_", collection.key());
        let mut entries = Vec::new();
        for key in self.backend.keys_with_prefix(&prefix)? {
            if let Some(entry) = self.decode(&key)? {
                entries.push(entry);
            }
        }
        Ok(entries)
    }

    /// Keys holding copies of unreadable blobs, in ascending order.
    pub fn unreadable_keys(&self) -> Result<Vec<String>> {
        self.backend.keys_with_prefix(UNREADABLE_PREFIX)
    }

    fn decode<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(bytes) = self.backend.read(key)? else {
            return Ok(None);
        };
        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(key, error = %e, "stored blob is unreadable, treating it as empty");
                Ok(None)
            }
        }
    }

    /// Like `decode`, but an unreadable blob is copied aside first because
    /// the caller is about to overwrite it.
    fn decode_for_update<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(bytes) = self.backend.read(key)? else {
            return Ok(None);
        };
        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                let backup = self.backup_key(key)?;
                warn!(key, backup = %backup, error = %e, "stored blob is unreadable, copying it aside before overwrite");
                self.backend.write(&backup, bytes)?;
                Ok(None)
            }
        }
    }

    /// First free backup key for `key`: `unreadable_<key>`, then `_1`, `_2`...
    fn backup_key(&self, key: &str) -> Result<String> {
        let base = format!("{}{}", UNREADABLE_PREFIX, key);
        let taken = self.backend.keys_with_prefix(&base)?.len();
        Ok(if taken == 0 {
            base
        } else {
            format!("{}_{}", base, taken)
        })
    }

    fn encode<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec(value).map_err(|e| Error::Serialization(e.to_string()))?;
        self.backend.write(key, bytes)
    }
}
