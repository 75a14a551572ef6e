//! Store configuration
//!
//! Retention is set per collection rather than at the call sites that
//! append records. The configuration can be written in RON:
//!
//! ```
//! use klogs_db::{Retention, StoreConfig};
//!
//! let config = StoreConfig::from_ron_str(
//!     "(retention: (temperatures: KeepLatest(20), waste: KeepLatest(500)))",
//! )
//! .unwrap();
//! assert_eq!(config.retention.temperatures, Retention::KeepLatest(20));
//! // Unlisted collections keep their defaults
//! assert_eq!(config.retention.cooking, Retention::Unbounded);
//! ```

use crate::error::Result;
use klogs_core::Collection;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Readings kept in the temperature collection by default
pub const DEFAULT_TEMPERATURE_RETENTION: usize = 50;

/// How many records a collection keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Retention {
    /// Keep everything
    #[default]
    Unbounded,
    /// Keep only the newest `n` records; older ones are evicted on insert
    KeepLatest(usize),
}

/// Retention for each append-style collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetentionPolicy {
    pub temperatures: Retention,
    pub cooking: Retention,
    pub expiry: Retention,
    pub waste: Retention,
    pub corrective_actions: Retention,
}

impl RetentionPolicy {
    /// Retention for a collection; keyed collections are never trimmed
    pub fn for_collection(&self, collection: Collection) -> Retention {
        match collection {
            Collection::Temperatures => self.temperatures,
            Collection::Cooking => self.cooking,
            Collection::Expiry => self.expiry,
            Collection::Waste => self.waste,
            Collection::CorrectiveActions => self.corrective_actions,
            Collection::CleaningLogs => Retention::Unbounded,
        }
    }
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            temperatures: Retention::KeepLatest(DEFAULT_TEMPERATURE_RETENTION),
            cooking: Retention::Unbounded,
            expiry: Retention::Unbounded,
            waste: Retention::Unbounded,
            corrective_actions: Retention::Unbounded,
        }
    }
}

/// Configuration for a [`Store`](crate::Store)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub retention: RetentionPolicy,
}

impl StoreConfig {
    /// Parse a configuration from RON text
    pub fn from_ron_str(content: &str) -> Result<Self> {
        Ok(ron::from_str(content)?)
    }

    /// Load a configuration from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_ron_str(&content)
    }
}
