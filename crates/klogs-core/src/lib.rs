//! Klogs Core - Kitchen food-safety records and compliance rules
//!
//! This crate provides the types and pure rules shared by the other crates:
//! - Record types for every log kept on the device (temperatures, cooking,
//!   expiry, waste, corrective actions, cleaning checklists)
//! - Record identifiers and the collection each record lives in
//! - Calendar helpers and a `Clock` abstraction
//! - The compliance evaluator for Critical Control Points (CCPs)
//!
//! Nothing here touches storage. Every rule is a function of its inputs, so
//! the store and the report crates can be tested against in-memory data.
//!
//! ## Example
//!
//! ```
//! use klogs_core::{evaluate_temperature, EquipmentType};
//!
//! let verdict = evaluate_temperature(EquipmentType::Fridge, 9.0);
//! assert!(!verdict.compliant);
//! ```

pub mod compliance;
mod corrective;
mod error;
mod identity;
mod record;
pub mod time;

pub use compliance::{
    classify_expiry, evaluate_cooking, evaluate_temperature, validate_temperature_input, Verdict,
};
pub use corrective::CorrectiveActionDraft;
pub use error::{Error, Result, ValidationError};
pub use identity::RecordId;
pub use record::{
    CcpType, CleaningLog, Collection, CookingEntry, CorrectiveAction, EquipmentType, ExpiryItem,
    ExpiryStatus, Insertion, NewCookingEntry, NewTemperatureReading, NewWasteEntry, Record,
    TemperatureReading, Timestamped, WasteEntry, WasteReason, CLEANING_TASKS,
    DEFAULT_COOKING_DISPOSITION, DEFAULT_COOKING_TARGET,
};
pub use time::{Clock, DayPart, FixedClock, SystemClock};
