//! Klogs Report - Daily compliance report and dashboard
//!
//! Both views are read-only summaries over a [`klogs_db::Store`]:
//!
//! - **Daily report**: one date's temperatures (re-evaluated), cooking,
//!   corrective actions, cleaning, expiry and waste, with an overall verdict
//! - **Dashboard**: counters for the home screen
//!
//! # Example
//!
//! ```rust,ignore
//! use klogs_db::Store;
//! use klogs_report::{compute_summary, generate_daily_report};
//!
//! let store = Store::in_memory();
//! let now = chrono::Local::now().naive_local();
//!
//! let summary = compute_summary(&store, now)?;
//! println!("Cleaning: {}%", summary.cleaning_percent);
//!
//! let text = generate_daily_report(&store, now.date(), now)?;
//! println!("{}", text);
//! ```

mod dashboard;
mod error;
mod report;

pub use dashboard::{compute_summary, CheckStatus, Summary};
pub use error::{Error, Result};
pub use report::{
    generate_daily_report, CleaningSummary, ComplianceStatus, CookingCheck, DailyReport,
    ExpirySummary, TemperatureCheck,
};
