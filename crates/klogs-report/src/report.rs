//! Daily compliance report

use crate::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use klogs_core::{
    evaluate_cooking, evaluate_temperature, CookingEntry, CorrectiveAction, ExpiryItem,
    ExpiryStatus, TemperatureReading, Timestamped, Verdict, WasteEntry, WasteReason,
    CLEANING_TASKS,
};
use klogs_db::{Backend, Store};
use serde::Serialize;
use std::fmt;
use tracing::info;

const TIME_FORMAT: &str = "%H:%M";

/// Overall outcome of a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComplianceStatus {
    #[serde(rename = "COMPLIANT")]
    Compliant,
    #[serde(rename = "ATTENTION REQUIRED")]
    AttentionRequired,
}

impl ComplianceStatus {
    /// Verdict for a day's tallies
    ///
    /// Breaches and corrective actions are matched by count only: records
    /// carry no link from an action to the reading it resolves, so one
    /// action per breach on the same date is taken as resolution.
    pub fn from_tally(breaches: usize, corrective_actions: usize) -> Self {
        if breaches > corrective_actions {
            ComplianceStatus::AttentionRequired
        } else {
            ComplianceStatus::Compliant
        }
    }
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComplianceStatus::Compliant => f.pad("COMPLIANT"),
            ComplianceStatus::AttentionRequired => f.pad("ATTENTION REQUIRED"),
        }
    }
}

/// A temperature reading with its re-evaluated verdict
#[derive(Debug, Clone, Serialize)]
pub struct TemperatureCheck {
    pub reading: TemperatureReading,
    pub verdict: Verdict,
}

/// A cooking record checked against its target
#[derive(Debug, Clone, Serialize)]
pub struct CookingCheck {
    pub entry: CookingEntry,
    pub verdict: Verdict,
}

/// Checklist progress for the day
#[derive(Debug, Clone, Serialize)]
pub struct CleaningSummary {
    /// Every checklist task and whether it was done, in checklist order
    pub tasks: Vec<(String, bool)>,
    pub completed: usize,
    pub pending: usize,
}

/// Expiry counts
#[derive(Debug, Clone, Serialize)]
pub struct ExpirySummary {
    /// Items already expired at report time
    pub expired: Vec<ExpiryItem>,
    /// Items whose expiry date is the report date
    pub expiring_on_date: Vec<ExpiryItem>,
}

/// Everything logged on one date, assembled for review
#[derive(Debug, Clone, Serialize)]
pub struct DailyReport {
    pub date: NaiveDate,
    pub generated_at: NaiveDateTime,
    pub temperatures: Vec<TemperatureCheck>,
    pub breach_count: usize,
    pub cooking: Vec<CookingCheck>,
    pub corrective_actions: Vec<CorrectiveAction>,
    pub cleaning: CleaningSummary,
    pub expiry: ExpirySummary,
    pub waste: Vec<WasteEntry>,
    pub waste_by_reason: IndexMap<WasteReason, usize>,
    pub status: ComplianceStatus,
}

impl DailyReport {
    /// Assemble the report for `date`
    ///
    /// Expired items are judged against `now`, not `date`, so a report for
    /// an earlier day still shows what is expired in the kitchen today.
    pub fn assemble<B: Backend>(store: &Store<B>, date: NaiveDate, now: NaiveDateTime) -> Result<Self> {
        let temperatures: Vec<TemperatureCheck> = chronological(store.temperature_logs()?, date)
            .into_iter()
            .map(|reading| {
                let verdict = evaluate_temperature(reading.equipment_type, reading.value);
                TemperatureCheck { reading, verdict }
            })
            .collect();
        let breach_count = temperatures.iter().filter(|t| !t.verdict.compliant).count();

        let cooking = chronological(store.cooking_logs()?, date)
            .into_iter()
            .map(|entry| {
                let verdict = evaluate_cooking(entry.target_temp, entry.actual_temp);
                CookingCheck { entry, verdict }
            })
            .collect();

        let corrective_actions = chronological(store.corrective_actions()?, date);

        let log = store.cleaning_log(date)?;
        let cleaning = CleaningSummary {
            tasks: CLEANING_TASKS
                .iter()
                .map(|task| (task.to_string(), log.is_done(task)))
                .collect(),
            completed: log.completed_count(),
            pending: log.pending_count(),
        };

        let today = now.date();
        let mut expiry = ExpirySummary {
            expired: Vec::new(),
            expiring_on_date: Vec::new(),
        };
        for view in store.expiry_items(today)? {
            if view.item.expires_on(date) {
                expiry.expiring_on_date.push(view.item.clone());
            }
            if view.status == ExpiryStatus::Expired {
                expiry.expired.push(view.item);
            }
        }

        let waste = chronological(store.waste_entries()?, date);
        let mut waste_by_reason = IndexMap::new();
        for reason in WasteReason::ALL {
            let count = waste.iter().filter(|w| w.reason == reason).count();
            if count > 0 {
                waste_by_reason.insert(reason, count);
            }
        }

        let status = ComplianceStatus::from_tally(breach_count, corrective_actions.len());
        info!(
            %date,
            breaches = breach_count,
            actions = corrective_actions.len(),
            %status,
            "assembled daily report"
        );

        Ok(Self {
            date,
            generated_at: now,
            temperatures,
            breach_count,
            cooking,
            corrective_actions,
            cleaning,
            expiry,
            waste,
            waste_by_reason,
            status,
        })
    }

    /// Export as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }
}

/// Render the text report for `date`
pub fn generate_daily_report<B: Backend>(
    store: &Store<B>,
    date: NaiveDate,
    now: NaiveDateTime,
) -> Result<String> {
    Ok(DailyReport::assemble(store, date, now)?.to_string())
}

/// Records logged on `date`, oldest first
fn chronological<T: Timestamped>(records: Vec<T>, date: NaiveDate) -> Vec<T> {
    let mut records: Vec<T> = records.into_iter().filter(|r| r.logged_on(date)).collect();
    records.sort_by_key(|r| r.timestamp());
    records
}

fn section(f: &mut fmt::Formatter<'_>, title: &str, count: Option<usize>) -> fmt::Result {
    match count {
        Some(n) => writeln!(f, "\n--- {} ({}) ---", title, n),
        None => writeln!(f, "\n--- {} ---", title),
    }
}

impl fmt::Display for DailyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "KITCHEN DAILY COMPLIANCE REPORT")?;
        writeln!(f, "Date: {}", self.date)?;
        writeln!(f, "Generated: {}", self.generated_at.format("%Y-%m-%d %H:%M"))?;
        writeln!(f, "Status: {}", self.status)?;

        section(f, "TEMPERATURE CHECKS", Some(self.temperatures.len()))?;
        if self.temperatures.is_empty() {
            writeln!(f, "None recorded")?;
        }
        for check in &self.temperatures {
            let r = &check.reading;
            write!(
                f,
                "{} {:<8} {:<6} {:>6.1}°C {}",
                r.timestamp.format(TIME_FORMAT),
                r.equipment_type,
                r.equipment_id,
                r.value,
                if check.verdict.compliant { "OK" } else { "BREACH" }
            )?;
            if let Some(staff) = &r.staff_name {
                write!(f, " ({})", staff)?;
            }
            writeln!(f)?;
            if !check.verdict.compliant {
                writeln!(f, "    {}", check.verdict.message)?;
            }
        }
        writeln!(f, "CCP breaches: {}", self.breach_count)?;

        section(f, "COOKING", Some(self.cooking.len()))?;
        if self.cooking.is_empty() {
            writeln!(f, "None recorded")?;
        }
        for check in &self.cooking {
            let e = &check.entry;
            writeln!(
                f,
                "{} {} [{}] {:.1}°C / target {:.1}°C {} - {} ({}, {})",
                e.timestamp.format(TIME_FORMAT),
                e.food_item,
                e.batch_id,
                e.actual_temp,
                e.target_temp,
                if check.verdict.compliant { "OK" } else { "BELOW TARGET" },
                e.disposition,
                e.operator,
                e.probe_id
            )?;
        }

        section(f, "CORRECTIVE ACTIONS", Some(self.corrective_actions.len()))?;
        if self.corrective_actions.is_empty() {
            writeln!(f, "None recorded")?;
        }
        for a in &self.corrective_actions {
            write!(f, "{} {:<8}", a.timestamp.format(TIME_FORMAT), a.ccp_type)?;
            if let Some(t) = a.temperature {
                write!(f, " {:.1}°C", t)?;
            }
            writeln!(f, " {} ({})", a.action, a.staff_name)?;
            if !a.notes.is_empty() {
                writeln!(f, "    Notes: {}", a.notes)?;
            }
            if let Some(cause) = &a.root_cause {
                writeln!(f, "    Root cause: {}", cause)?;
            }
            if let Some(prevention) = &a.prevention {
                writeln!(f, "    Prevention: {}", prevention)?;
            }
        }

        section(f, "CLEANING", None)?;
        for (task, done) in &self.cleaning.tasks {
            writeln!(f, "[{}] {}", if *done { "x" } else { " " }, task)?;
        }
        writeln!(
            f,
            "Completed: {} / {}, pending: {}",
            self.cleaning.completed,
            CLEANING_TASKS.len(),
            self.cleaning.pending
        )?;

        section(f, "EXPIRY", None)?;
        writeln!(f, "Expired items: {}", self.expiry.expired.len())?;
        for item in &self.expiry.expired {
            writeln!(f, "    {} (expired {})", item.item_name, item.expiry_date)?;
        }
        writeln!(f, "Expiring on {}: {}", self.date, self.expiry.expiring_on_date.len())?;
        for item in &self.expiry.expiring_on_date {
            writeln!(f, "    {}", item.item_name)?;
        }

        section(f, "WASTE", Some(self.waste.len()))?;
        if self.waste.is_empty() {
            writeln!(f, "None recorded")?;
        }
        for w in &self.waste {
            write!(
                f,
                "{} {} - {} [{}]",
                w.timestamp.format(TIME_FORMAT),
                w.item,
                w.quantity,
                w.reason
            )?;
            if let Some(notes) = &w.notes {
                write!(f, " {}", notes)?;
            }
            writeln!(f)?;
        }
        for (reason, count) in &self.waste_by_reason {
            writeln!(f, "{}: {}", reason, count)?;
        }

        section(f, "SUMMARY", None)?;
        writeln!(f, "CCP breaches: {}", self.breach_count)?;
        writeln!(f, "Corrective actions: {}", self.corrective_actions.len())?;
        writeln!(f, "Overall: {}", self.status)
    }
}
