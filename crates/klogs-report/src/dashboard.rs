//! At-a-glance counters for the home screen

use crate::Result;
use chrono::NaiveDateTime;
use klogs_core::{DayPart, TemperatureReading, Timestamped};
use klogs_db::{Backend, Store};
use serde::Serialize;
use std::fmt;

/// State of a scheduled temperature check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CheckStatus {
    /// At least one reading was logged in the window
    Completed,
    /// No reading yet, deadline not reached
    Pending,
    /// No reading and the deadline has passed
    Overdue,
}

impl CheckStatus {
    fn evaluate(readings_today: &[TemperatureReading], part: DayPart, now: NaiveDateTime) -> Self {
        let done = readings_today
            .iter()
            .any(|r| DayPart::of(r.timestamp.time()) == part);
        if done {
            CheckStatus::Completed
        } else if part.is_past_deadline(now.time()) {
            CheckStatus::Overdue
        } else {
            CheckStatus::Pending
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckStatus::Completed => f.pad("Completed"),
            CheckStatus::Pending => f.pad("Pending"),
            CheckStatus::Overdue => f.pad("Overdue"),
        }
    }
}

/// Dashboard counters
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    /// Today's checklist completion, whole percent
    pub cleaning_percent: u32,
    /// Newest reading overall, regardless of date
    pub last_reading: Option<TemperatureReading>,
    /// Items whose expiry date is before today
    pub expired_count: usize,
    pub waste_count_today: usize,
    pub morning_check: CheckStatus,
    pub afternoon_check: CheckStatus,
}

impl Summary {
    pub fn check(&self, part: DayPart) -> CheckStatus {
        match part {
            DayPart::Morning => self.morning_check,
            DayPart::Afternoon => self.afternoon_check,
        }
    }
}

/// Compute the dashboard as of `now`
pub fn compute_summary<B: Backend>(store: &Store<B>, now: NaiveDateTime) -> Result<Summary> {
    let today = now.date();

    let cleaning_percent = store.cleaning_log(today)?.completion_percent();

    let readings = store.temperature_logs()?;
    let last_reading = readings.first().cloned();
    let readings_today: Vec<TemperatureReading> =
        readings.into_iter().filter(|r| r.logged_on(today)).collect();

    let expired_count = store
        .expiry_items(today)?
        .iter()
        .filter(|view| view.item.expiry_date < today)
        .count();

    let waste_count_today = store
        .waste_entries()?
        .iter()
        .filter(|w| w.logged_on(today))
        .count();

    Ok(Summary {
        cleaning_percent,
        last_reading,
        expired_count,
        waste_count_today,
        morning_check: CheckStatus::evaluate(&readings_today, DayPart::Morning, now),
        afternoon_check: CheckStatus::evaluate(&readings_today, DayPart::Afternoon, now),
    })
}
