//! Klogs DB - On-device record store
//!
//! Every collection is persisted as one JSON blob under a fixed key
//! (cleaning logs: one blob per calendar date). The blob layer is the
//! [`Backend`] trait, with two implementations:
//! - [`NativeBackend`] - native_db database, on disk or in memory
//! - [`MemoryBackend`] - plain in-process map, for tests and previews
//!
//! [`Store`] adds typed collection operations, retention, and the logging
//! operations the kitchen screens call.

mod backend;
mod config;
mod error;
mod models;
mod queries;
mod store;

pub use backend::{Backend, MemoryBackend, NativeBackend};
pub use config::{Retention, RetentionPolicy, StoreConfig, DEFAULT_TEMPERATURE_RETENTION};
pub use error::{Error, Result};
pub use queries::ExpiryView;
pub use store::{Store, UNREADABLE_PREFIX};
