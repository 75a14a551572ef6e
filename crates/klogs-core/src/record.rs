//! Record types kept in the device store
//!
//! Field names serialize in camelCase to match the blobs already persisted
//! on devices. Older blobs used a few different names; those are accepted
//! as aliases when reading, as are their epoch-millisecond and UTC ISO
//! timestamps.

use crate::compliance::{classify_expiry, validate_temperature_input};
use crate::error::{Error, Result, ValidationError};
use crate::identity::RecordId;
use crate::time;
use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed daily cleaning checklist
pub const CLEANING_TASKS: [&str; 7] = [
    "Food prep surfaces sanitized",
    "Floors cleaned",
    "Waste removed",
    "Fridges cleaned",
    "Equipment cleaned",
    "Hand wash stations stocked",
    "Thermometers checked",
];

/// Core target temperature for cooked food, in °C
pub const DEFAULT_COOKING_TARGET: f64 = 75.0;

/// Disposition recorded when the operator does not choose one
pub const DEFAULT_COOKING_DISPOSITION: &str = "Released for service";

const DEFAULT_PROBE: &str = "Probe P-01";

/// Where new records go in a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// Prepended, so index 0 is the newest record
    NewestFirst,
    /// Appended in insertion order
    OldestFirst,
}

/// A named collection in the record store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Collection {
    Temperatures,
    Cooking,
    Expiry,
    Waste,
    CorrectiveActions,
    /// Keyed by calendar date, one blob per day
    CleaningLogs,
}

impl Collection {
    /// Every collection, in a stable order
    pub const ALL: [Collection; 6] = [
        Collection::Temperatures,
        Collection::Cooking,
        Collection::Expiry,
        Collection::Waste,
        Collection::CorrectiveActions,
        Collection::CleaningLogs,
    ];

    /// Storage key of the collection (key prefix for keyed collections)
    pub const fn key(self) -> &'static str {
        match self {
            Collection::Temperatures => "temperature_logs_box",
            Collection::Cooking => "cooking_logs_box",
            Collection::Expiry => "expiry_items_box",
            Collection::Waste => "waste_logs_box",
            Collection::CorrectiveActions => "corrective_actions_box",
            Collection::CleaningLogs => "cleaning_logs_box",
        }
    }

    /// Storage key of one entry of a keyed collection
    pub fn keyed(self, suffix: impl fmt::Display) -> String {
        format!("{}_{}", self.key(), suffix)
    }

    pub const fn insertion(self) -> Insertion {
        match self {
            Collection::Expiry => Insertion::OldestFirst,
            _ => Insertion::NewestFirst,
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// A record stored in an append-style collection
pub trait Record: Serialize + DeserializeOwned {
    /// Collection holding records of this type
    const COLLECTION: Collection;

    fn id(&self) -> &RecordId;
}

/// A record stamped with the time it was logged
pub trait Timestamped {
    fn timestamp(&self) -> NaiveDateTime;

    /// Whether the record was logged on the given calendar date
    fn logged_on(&self, date: NaiveDate) -> bool {
        self.timestamp().date() == date
    }
}

/// Kind of monitored equipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EquipmentType {
    Fridge,
    Freezer,
    HotHold,
}

impl EquipmentType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            EquipmentType::Fridge => "FRIDGE",
            EquipmentType::Freezer => "FREEZER",
            EquipmentType::HotHold => "HOT_HOLD",
        }
    }
}

impl fmt::Display for EquipmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Critical Control Point a corrective action responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CcpType {
    Fridge,
    Freezer,
    HotHold,
    Expiry,
}

impl CcpType {
    /// Equipment monitored by this CCP, `None` for expiry
    pub const fn equipment(&self) -> Option<EquipmentType> {
        match self {
            CcpType::Fridge => Some(EquipmentType::Fridge),
            CcpType::Freezer => Some(EquipmentType::Freezer),
            CcpType::HotHold => Some(EquipmentType::HotHold),
            CcpType::Expiry => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            CcpType::Fridge => "FRIDGE",
            CcpType::Freezer => "FREEZER",
            CcpType::HotHold => "HOT_HOLD",
            CcpType::Expiry => "EXPIRY",
        }
    }
}

impl From<EquipmentType> for CcpType {
    fn from(equipment: EquipmentType) -> Self {
        match equipment {
            EquipmentType::Fridge => CcpType::Fridge,
            EquipmentType::Freezer => CcpType::Freezer,
            EquipmentType::HotHold => CcpType::HotHold,
        }
    }
}

impl fmt::Display for CcpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A logged equipment temperature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureReading {
    pub id: RecordId,
    #[serde(deserialize_with = "time::deserialize_timestamp")]
    pub timestamp: NaiveDateTime,
    #[serde(alias = "type")]
    pub equipment_type: EquipmentType,
    /// Reading in °C
    pub value: f64,
    #[serde(default, alias = "equipmentNumber")]
    pub equipment_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff_name: Option<String>,
    #[serde(default, alias = "action", skip_serializing_if = "Option::is_none")]
    pub remedy_note: Option<String>,
}

impl Record for TemperatureReading {
    const COLLECTION: Collection = Collection::Temperatures;

    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Timestamped for TemperatureReading {
    fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }
}

/// Operator input for a temperature reading, before validation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewTemperatureReading {
    pub equipment_type: Option<EquipmentType>,
    pub value: f64,
    pub equipment_id: String,
    pub location: Option<String>,
    pub item: Option<String>,
    pub staff_name: Option<String>,
    pub remedy_note: Option<String>,
}

impl NewTemperatureReading {
    pub fn new(equipment_type: EquipmentType, value: f64, equipment_id: impl Into<String>) -> Self {
        Self {
            equipment_type: Some(equipment_type),
            value,
            equipment_id: equipment_id.into(),
            ..Default::default()
        }
    }

    pub fn with_staff(mut self, staff_name: impl Into<String>) -> Self {
        self.staff_name = Some(staff_name.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_item(mut self, item: impl Into<String>) -> Self {
        self.item = Some(item.into());
        self
    }

    pub fn with_remedy_note(mut self, note: impl Into<String>) -> Self {
        self.remedy_note = Some(note.into());
        self
    }

    /// Validate the entry and stamp it as a stored reading
    pub fn into_reading(self, now: NaiveDateTime) -> std::result::Result<TemperatureReading, ValidationError> {
        let equipment_type = self
            .equipment_type
            .ok_or_else(|| ValidationError::new("equipmentType", "is required"))?;
        validate_temperature_input(equipment_type, self.value)?;
        Ok(TemperatureReading {
            id: RecordId::generate(),
            timestamp: now,
            equipment_type,
            value: self.value,
            equipment_id: self.equipment_id,
            location: non_blank(self.location),
            item: non_blank(self.item),
            staff_name: non_blank(self.staff_name),
            remedy_note: non_blank(self.remedy_note),
        })
    }
}

/// A cooking probe record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CookingEntry {
    pub id: RecordId,
    #[serde(deserialize_with = "time::deserialize_timestamp")]
    pub timestamp: NaiveDateTime,
    #[serde(alias = "item")]
    pub food_item: String,
    #[serde(alias = "batch")]
    pub batch_id: String,
    pub target_temp: f64,
    pub actual_temp: f64,
    #[serde(default, alias = "probe")]
    pub probe_id: String,
    pub operator: String,
    #[serde(alias = "status")]
    pub disposition: String,
}

impl Record for CookingEntry {
    const COLLECTION: Collection = Collection::Cooking;

    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Timestamped for CookingEntry {
    fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }
}

/// Operator input for a cooking record, before validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCookingEntry {
    pub food_item: String,
    pub batch_id: String,
    pub target_temp: f64,
    pub actual_temp: f64,
    pub probe_id: String,
    pub operator: String,
    pub disposition: String,
}

impl NewCookingEntry {
    /// Cooking input with the default target, probe and disposition
    pub fn new(
        food_item: impl Into<String>,
        batch_id: impl Into<String>,
        actual_temp: f64,
        operator: impl Into<String>,
    ) -> Self {
        Self {
            food_item: food_item.into(),
            batch_id: batch_id.into(),
            target_temp: DEFAULT_COOKING_TARGET,
            actual_temp,
            probe_id: DEFAULT_PROBE.to_string(),
            operator: operator.into(),
            disposition: DEFAULT_COOKING_DISPOSITION.to_string(),
        }
    }

    pub fn with_target(mut self, target_temp: f64) -> Self {
        self.target_temp = target_temp;
        self
    }

    pub fn with_probe(mut self, probe_id: impl Into<String>) -> Self {
        self.probe_id = probe_id.into();
        self
    }

    pub fn with_disposition(mut self, disposition: impl Into<String>) -> Self {
        self.disposition = disposition.into();
        self
    }

    /// Validate the entry and stamp it as a stored record
    pub fn into_entry(self, now: NaiveDateTime) -> std::result::Result<CookingEntry, ValidationError> {
        ValidationError::require_text("foodItem", &self.food_item)?;
        ValidationError::require_text("batchId", &self.batch_id)?;
        ValidationError::require_text("operator", &self.operator)?;
        if !self.actual_temp.is_finite() {
            return Err(ValidationError::new("actualTemp", "must be a number"));
        }
        if !self.target_temp.is_finite() {
            return Err(ValidationError::new("targetTemp", "must be a number"));
        }
        let disposition = if self.disposition.trim().is_empty() {
            DEFAULT_COOKING_DISPOSITION.to_string()
        } else {
            self.disposition
        };
        Ok(CookingEntry {
            id: RecordId::generate(),
            timestamp: now,
            food_item: self.food_item,
            batch_id: self.batch_id,
            target_temp: self.target_temp,
            actual_temp: self.actual_temp,
            probe_id: self.probe_id,
            operator: self.operator,
            disposition,
        })
    }
}

/// Freshness of a prepared item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpiryStatus {
    #[serde(rename = "ACTIVE")]
    Active,
    #[serde(rename = "EXPIRES SOON")]
    ExpiresSoon,
    #[serde(rename = "EXPIRED")]
    Expired,
}

impl ExpiryStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ExpiryStatus::Active => "ACTIVE",
            ExpiryStatus::ExpiresSoon => "EXPIRES SOON",
            ExpiryStatus::Expired => "EXPIRED",
        }
    }
}

impl fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A prepared item with a use-by date
///
/// There is deliberately no status field: freshness depends on the day it
/// is looked at, so it is computed with [`ExpiryItem::status`]. A `status`
/// key found in stored data is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryItem {
    pub id: RecordId,
    pub item_name: String,
    pub prep_date: NaiveDate,
    #[serde(alias = "expDate")]
    pub expiry_date: NaiveDate,
}

impl ExpiryItem {
    /// Item expiring `shelf_life_days` after it was prepared
    pub fn new(item_name: impl Into<String>, prep_date: NaiveDate, shelf_life_days: u32) -> Result<Self> {
        let expiry_date = time::add_days(prep_date, shelf_life_days)?;
        Self::with_dates(item_name, prep_date, expiry_date)
    }

    /// Item with an explicit expiry date
    pub fn with_dates(item_name: impl Into<String>, prep_date: NaiveDate, expiry_date: NaiveDate) -> Result<Self> {
        let item_name = item_name.into();
        ValidationError::require_text("itemName", &item_name).map_err(Error::from)?;
        Ok(Self {
            id: RecordId::generate(),
            item_name,
            prep_date,
            expiry_date,
        })
    }

    /// Freshness as of `today`
    pub fn status(&self, today: NaiveDate) -> ExpiryStatus {
        classify_expiry(self.expiry_date, today)
    }

    pub fn expires_on(&self, date: NaiveDate) -> bool {
        self.expiry_date == date
    }
}

impl Record for ExpiryItem {
    const COLLECTION: Collection = Collection::Expiry;

    fn id(&self) -> &RecordId {
        &self.id
    }
}

/// Why food was thrown away
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WasteReason {
    #[serde(rename = "SPOILAGE")]
    Spoilage,
    #[serde(rename = "OVER-PREP")]
    OverPrep,
    #[serde(rename = "CUSTOMER RETURN")]
    CustomerReturn,
    #[serde(rename = "DAMAGED")]
    Damaged,
    #[serde(rename = "EXPIRED")]
    Expired,
}

impl WasteReason {
    pub const ALL: [WasteReason; 5] = [
        WasteReason::Spoilage,
        WasteReason::OverPrep,
        WasteReason::CustomerReturn,
        WasteReason::Damaged,
        WasteReason::Expired,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            WasteReason::Spoilage => "SPOILAGE",
            WasteReason::OverPrep => "OVER-PREP",
            WasteReason::CustomerReturn => "CUSTOMER RETURN",
            WasteReason::Damaged => "DAMAGED",
            WasteReason::Expired => "EXPIRED",
        }
    }
}

impl fmt::Display for WasteReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Discarded food
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WasteEntry {
    pub id: RecordId,
    #[serde(deserialize_with = "time::deserialize_timestamp")]
    pub timestamp: NaiveDateTime,
    pub item: String,
    /// Free text, e.g. "2 kg" or "3 portions"
    pub quantity: String,
    pub reason: WasteReason,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Record for WasteEntry {
    const COLLECTION: Collection = Collection::Waste;

    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Timestamped for WasteEntry {
    fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }
}

/// Operator input for a waste record, before validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWasteEntry {
    pub item: String,
    pub quantity: String,
    pub reason: WasteReason,
    pub notes: Option<String>,
}

impl NewWasteEntry {
    pub fn new(item: impl Into<String>, quantity: impl Into<String>, reason: WasteReason) -> Self {
        Self {
            item: item.into(),
            quantity: quantity.into(),
            reason,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Validate the entry and stamp it as a stored record
    pub fn into_entry(self, now: NaiveDateTime) -> std::result::Result<WasteEntry, ValidationError> {
        ValidationError::require_text("item", &self.item)?;
        ValidationError::require_text("quantity", &self.quantity)?;
        Ok(WasteEntry {
            id: RecordId::generate(),
            timestamp: now,
            item: self.item,
            quantity: self.quantity,
            reason: self.reason,
            notes: non_blank(self.notes),
        })
    }
}

/// Remediation logged after a CCP breach
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectiveAction {
    pub id: RecordId,
    #[serde(deserialize_with = "time::deserialize_timestamp")]
    pub timestamp: NaiveDateTime,
    pub ccp_type: CcpType,
    /// Offending reading in °C; absent for expiry actions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    pub action: String,
    #[serde(default)]
    pub notes: String,
    pub staff_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_cause: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prevention: Option<String>,
}

impl Record for CorrectiveAction {
    const COLLECTION: Collection = Collection::CorrectiveActions;

    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Timestamped for CorrectiveAction {
    fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }
}

/// Cleaning checklist for one calendar date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningLog {
    pub date: NaiveDate,
    #[serde(default)]
    pub tasks: IndexMap<String, bool>,
}

impl CleaningLog {
    /// Empty checklist for a date
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            tasks: IndexMap::new(),
        }
    }

    pub fn is_done(&self, task: &str) -> bool {
        self.tasks.get(task).copied().unwrap_or(false)
    }

    pub fn set(&mut self, task: impl Into<String>, done: bool) {
        self.tasks.insert(task.into(), done);
    }

    /// Flip a task and return its new state
    pub fn toggle(&mut self, task: &str) -> bool {
        let done = !self.is_done(task);
        self.set(task, done);
        done
    }

    /// Checklist tasks marked done; tasks outside the checklist don't count
    pub fn completed_count(&self) -> usize {
        CLEANING_TASKS.iter().filter(|t| self.is_done(t)).count()
    }

    pub fn pending_count(&self) -> usize {
        CLEANING_TASKS.len() - self.completed_count()
    }

    /// Completion rounded to a whole percent
    pub fn completion_percent(&self) -> u32 {
        let ratio = self.completed_count() as f64 / CLEANING_TASKS.len() as f64;
        (ratio * 100.0).round() as u32
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        date(2026, 2, 28).and_time(NaiveTime::from_hms_opt(h, m, 0).unwrap())
    }

    #[test]
    fn test_collection_keys() {
        assert_eq!(Collection::Temperatures.key(), "temperature_logs_box");
        assert_eq!(
            Collection::CleaningLogs.keyed(date(2026, 2, 28)),
            "cleaning_logs_box_2026-02-28"
        );
        assert_eq!(Collection::Expiry.insertion(), Insertion::OldestFirst);
        assert_eq!(Collection::Waste.insertion(), Insertion::NewestFirst);
    }

    #[test]
    fn test_temperature_entry_validation() {
        let reading = NewTemperatureReading::new(EquipmentType::Fridge, 4.0, "F-01")
            .with_staff("Sam")
            .with_location("")
            .into_reading(at(9, 15))
            .unwrap();
        assert_eq!(reading.timestamp, at(9, 15));
        assert_eq!(reading.staff_name.as_deref(), Some("Sam"));
        assert_eq!(reading.location, None);

        let err = NewTemperatureReading::new(EquipmentType::Fridge, 9.0, "F-01")
            .into_reading(at(9, 15))
            .unwrap_err();
        assert_eq!(err.field, "value");

        let err = NewTemperatureReading::default().into_reading(at(9, 15)).unwrap_err();
        assert_eq!(err.field, "equipmentType");
    }

    #[test]
    fn test_cooking_entry_defaults_and_required_fields() {
        let entry = NewCookingEntry::new("Chicken", "B-12", 78.5, "Alex")
            .with_disposition("  ")
            .into_entry(at(12, 0))
            .unwrap();
        assert_eq!(entry.target_temp, DEFAULT_COOKING_TARGET);
        assert_eq!(entry.disposition, DEFAULT_COOKING_DISPOSITION);

        let err = NewCookingEntry::new("Chicken", "", 78.5, "Alex")
            .into_entry(at(12, 0))
            .unwrap_err();
        assert_eq!(err.field, "batchId");

        let err = NewCookingEntry::new("Chicken", "B-12", f64::NAN, "Alex")
            .into_entry(at(12, 0))
            .unwrap_err();
        assert_eq!(err.field, "actualTemp");
    }

    #[test]
    fn test_expiry_item_from_shelf_life() {
        let item = ExpiryItem::new("Soup", date(2026, 2, 26), 3).unwrap();
        assert_eq!(item.expiry_date, date(2026, 3, 1));
        assert_eq!(item.status(date(2026, 2, 28)), ExpiryStatus::ExpiresSoon);
        assert!(item.expires_on(date(2026, 3, 1)));

        assert!(ExpiryItem::new("  ", date(2026, 2, 26), 3).is_err());
    }

    #[test]
    fn test_stored_expiry_status_is_ignored() {
        let json = r#"{"id":"1","itemName":"Rice","prepDate":"2026-02-20","expDate":"2026-02-21","status":"ACTIVE"}"#;
        let item: ExpiryItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.status(date(2026, 2, 28)), ExpiryStatus::Expired);

        let out = serde_json::to_string(&item).unwrap();
        assert!(!out.contains("status"));
        assert!(out.contains("\"expiryDate\":\"2026-02-21\""));
    }

    #[test]
    fn test_legacy_temperature_fields() {
        let json = r#"{"id":"1","timestamp":"2026-02-28T09:15:00","type":"FREEZER","value":-20.0,"equipmentNumber":"Z-2"}"#;
        let reading: TemperatureReading = serde_json::from_str(json).unwrap();
        assert_eq!(reading.equipment_type, EquipmentType::Freezer);
        assert_eq!(reading.equipment_id, "Z-2");
    }

    fn local_from_utc(h: u32, m: u32) -> NaiveDateTime {
        at(h, m).and_utc().with_timezone(&chrono::Local).naive_local()
    }

    #[test]
    fn test_device_blobs_decode() {
        let millis = at(9, 15).and_utc().timestamp_millis();
        let json = format!(
            r#"[{{"id":"1772270100000","timestamp":{},"type":"FRIDGE","value":3.5,"equipmentNumber":"F-01","staffName":"Sam"}}]"#,
            millis
        );
        let readings: Vec<TemperatureReading> = serde_json::from_str(&json).unwrap();
        assert_eq!(readings[0].timestamp, local_from_utc(9, 15));
        assert_eq!(readings[0].equipment_id, "F-01");

        let json = r#"[{"id":"1772280000000","timestamp":"2026-02-28T12:00:00.000Z","item":"Chicken","batch":"B-12","targetTemp":75,"actualTemp":78.5,"probe":"P-1","operator":"Alex","status":"PASS"}]"#;
        let cooking: Vec<CookingEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(cooking[0].timestamp, local_from_utc(12, 0));
        assert_eq!(cooking[0].batch_id, "B-12");
        assert_eq!(cooking[0].disposition, "PASS");

        let json = r#"[{"id":"1772288100000","timestamp":"2026-02-28T14:15:00.000Z","item":"Bread","quantity":"2 loaves","reason":"DAMAGED"}]"#;
        let waste: Vec<WasteEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(waste[0].timestamp, local_from_utc(14, 15));
        assert_eq!(waste[0].reason, WasteReason::Damaged);

        let json = r#"[{"id":"1772290800000","timestamp":"2026-02-28T15:00:00.000Z","ccpType":"FRIDGE","temperature":8,"action":"Moved stock","notes":"","staffName":"Sam"}]"#;
        let actions: Vec<CorrectiveAction> = serde_json::from_str(json).unwrap();
        assert_eq!(actions[0].timestamp, local_from_utc(15, 0));
        assert_eq!(actions[0].temperature, Some(8.0));

        // Records written by this crate keep their naive local form
        let out = serde_json::to_string(&waste[0]).unwrap();
        let again: WasteEntry = serde_json::from_str(&out).unwrap();
        assert_eq!(again.timestamp, waste[0].timestamp);
    }

    #[test]
    fn test_waste_reason_wire_names() {
        let json = serde_json::to_string(&WasteReason::CustomerReturn).unwrap();
        assert_eq!(json, "\"CUSTOMER RETURN\"");
        let reason: WasteReason = serde_json::from_str("\"OVER-PREP\"").unwrap();
        assert_eq!(reason, WasteReason::OverPrep);
    }

    #[test]
    fn test_waste_entry_requires_item_and_quantity() {
        let err = NewWasteEntry::new("Bread", "", WasteReason::Damaged)
            .into_entry(at(14, 0))
            .unwrap_err();
        assert_eq!(err.field, "quantity");

        let entry = NewWasteEntry::new("Bread", "2 loaves", WasteReason::Damaged)
            .with_notes("")
            .into_entry(at(14, 0))
            .unwrap();
        assert_eq!(entry.notes, None);
        assert!(entry.logged_on(date(2026, 2, 28)));
    }

    #[test]
    fn test_cleaning_log_progress() {
        let mut log = CleaningLog::new(date(2026, 2, 28));
        for task in &CLEANING_TASKS[..4] {
            log.set(*task, true);
        }
        log.set("Not on the checklist", true);
        assert_eq!(log.completed_count(), 4);
        assert_eq!(log.pending_count(), 3);
        assert_eq!(log.completion_percent(), 57);

        assert!(!log.toggle(CLEANING_TASKS[0]));
        assert_eq!(log.completed_count(), 3);
    }

    #[test]
    fn test_ccp_type_from_equipment() {
        assert_eq!(CcpType::from(EquipmentType::HotHold), CcpType::HotHold);
        assert_eq!(CcpType::Expiry.equipment(), None);
        assert_eq!(CcpType::HotHold.to_string(), "HOT_HOLD");
    }
}
