//! Logging operations used by the kitchen screens.

use crate::backend::Backend;
use crate::error::Result;
use crate::store::Store;
use chrono::{NaiveDate, NaiveDateTime};
use klogs_core::{
    CleaningLog, Collection, CookingEntry, CorrectiveAction, CorrectiveActionDraft, ExpiryItem,
    ExpiryStatus, NewCookingEntry, NewTemperatureReading, NewWasteEntry, RecordId,
    TemperatureReading, WasteEntry,
};
use serde::Serialize;
use tracing::debug;

/// An expiry item with its status computed for a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpiryView {
    pub item: ExpiryItem,
    pub status: ExpiryStatus,
}

impl<B: Backend> Store<B> {
    /// Validate and store an operator's temperature entry.
    pub fn log_temperature(&self, new: NewTemperatureReading, now: NaiveDateTime) -> Result<TemperatureReading> {
        let reading = new.into_reading(now)?;
        self.append(reading.clone())?;
        Ok(reading)
    }

    /// Temperature readings, newest first.
    pub fn temperature_logs(&self) -> Result<Vec<TemperatureReading>> {
        self.get_all()
    }

    /// The most recent temperature reading, if any.
    pub fn latest_temperature(&self) -> Result<Option<TemperatureReading>> {
        Ok(self.temperature_logs()?.into_iter().next())
    }

    /// Validate and store a cooking record.
    pub fn log_cooking(&self, new: NewCookingEntry, now: NaiveDateTime) -> Result<CookingEntry> {
        let entry = new.into_entry(now)?;
        self.append(entry.clone())?;
        Ok(entry)
    }

    /// Cooking records, newest first.
    pub fn cooking_logs(&self) -> Result<Vec<CookingEntry>> {
        self.get_all()
    }

    /// Store a prepared item expiring `shelf_life_days` after `prep_date`.
    pub fn add_expiry_item(
        &self,
        item_name: &str,
        prep_date: NaiveDate,
        shelf_life_days: u32,
    ) -> Result<ExpiryItem> {
        let item = ExpiryItem::new(item_name, prep_date, shelf_life_days)?;
        self.append(item.clone())?;
        Ok(item)
    }

    /// Expiry items in insertion order, each classified against `today`.
    pub fn expiry_items(&self, today: NaiveDate) -> Result<Vec<ExpiryView>> {
        Ok(self
            .get_all::<ExpiryItem>()?
            .into_iter()
            .map(|item| {
                let status = item.status(today);
                ExpiryView { item, status }
            })
            .collect())
    }

    pub fn delete_expiry_item(&self, id: &RecordId) -> Result<bool> {
        self.delete_by_id::<ExpiryItem>(id)
    }

    /// Validate and store a waste record.
    pub fn log_waste(&self, new: NewWasteEntry, now: NaiveDateTime) -> Result<WasteEntry> {
        let entry = new.into_entry(now)?;
        self.append(entry.clone())?;
        Ok(entry)
    }

    /// Waste records, newest first.
    pub fn waste_entries(&self) -> Result<Vec<WasteEntry>> {
        self.get_all()
    }

    pub fn delete_waste_entry(&self, id: &RecordId) -> Result<bool> {
        self.delete_by_id::<WasteEntry>(id)
    }

    /// Validate and store a corrective action.
    ///
    /// The reading that triggered it is left untouched; the two are only
    /// related by CCP type, value and date.
    pub fn record_corrective_action(
        &self,
        draft: CorrectiveActionDraft,
        now: NaiveDateTime,
    ) -> Result<CorrectiveAction> {
        let action = draft.into_action(now)?;
        self.append(action.clone())?;
        debug!(ccp = %action.ccp_type, staff = %action.staff_name, "recorded corrective action");
        Ok(action)
    }

    /// Corrective actions, newest first.
    pub fn corrective_actions(&self) -> Result<Vec<CorrectiveAction>> {
        self.get_all()
    }

    /// Cleaning checklist for a date; empty if nothing was saved.
    pub fn cleaning_log(&self, date: NaiveDate) -> Result<CleaningLog> {
        Ok(self
            .get(Collection::CleaningLogs, date)?
            .unwrap_or_else(|| CleaningLog::new(date)))
    }

    /// Overwrite the checklist for the log's date.
    pub fn save_cleaning_log(&self, log: &CleaningLog) -> Result<()> {
        self.put(Collection::CleaningLogs, log.date, log)
    }

    /// Mark a task done or not done on a date.
    pub fn set_cleaning_task(&self, date: NaiveDate, task: &str, done: bool) -> Result<CleaningLog> {
        let mut log = self.cleaning_log(date)?;
        log.set(task, done);
        self.save_cleaning_log(&log)?;
        Ok(log)
    }

    /// Flip a task on a date.
    pub fn toggle_cleaning_task(&self, date: NaiveDate, task: &str) -> Result<CleaningLog> {
        let mut log = self.cleaning_log(date)?;
        log.toggle(task);
        self.save_cleaning_log(&log)?;
        Ok(log)
    }

    /// Every saved checklist, most recent date first.
    pub fn cleaning_history(&self) -> Result<Vec<CleaningLog>> {
        let mut logs: Vec<CleaningLog> = self.get_keyed(Collection::CleaningLogs)?;
        logs.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(logs)
    }
}
