//! Blob model for database storage.

use native_db::*;
use native_model::{native_model, Model};
use serde::{Deserialize, Serialize};

/// One stored collection (or one keyed entry of a collection).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 1, version = 1)]
#[native_db]
pub struct StoredBlob {
    /// Primary key - collection key, e.g. `temperature_logs_box`.
    #[primary_key]
    pub key: String,
    /// Serialized JSON payload.
    pub data: Vec<u8>,
}

impl StoredBlob {
    pub fn new(key: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            key: key.into(),
            data,
        }
    }
}
