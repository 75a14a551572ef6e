//! Kitchen Day Demo
//!
//! Logs one shift into an in-memory native_db store, then prints the
//! dashboard and the daily compliance report.
//!
//! Usage: `kitchen_day [store-config.ron]`. Set `RUST_LOG=debug` to see
//! every store write.

use chrono::{Duration, NaiveDateTime};
use klogs_core::{
    evaluate_temperature, Clock, CorrectiveActionDraft, DayPart, EquipmentType, NewCookingEntry,
    NewTemperatureReading, NewWasteEntry, SystemClock, WasteReason, CLEANING_TASKS,
};
use klogs_db::{NativeBackend, Store, StoreConfig};
use klogs_report::{compute_summary, DailyReport};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => StoreConfig::load(&path)?,
        None => StoreConfig::default(),
    };
    let store = Store::new(NativeBackend::in_memory()?, config);

    let now = SystemClock.now();
    let today = now.date();
    // Spread the shift over the hours before now
    let earlier = |hours: i64| -> NaiveDateTime { now - Duration::hours(hours) };

    println!("=== Klogs Kitchen Day ===\n");

    // Temperatures: one rejected at entry, the rest stored
    let entries = [
        NewTemperatureReading::new(EquipmentType::Fridge, 3.5, "F-01").with_staff("Sam"),
        NewTemperatureReading::new(EquipmentType::Freezer, -21.0, "Z-01").with_staff("Sam"),
        NewTemperatureReading::new(EquipmentType::Fridge, 7.0, "F-02").with_staff("Sam"),
        NewTemperatureReading::new(EquipmentType::HotHold, 58.0, "H-01")
            .with_staff("Alex")
            .with_item("Curry"),
    ];
    for (i, entry) in entries.into_iter().enumerate() {
        match store.log_temperature(entry, earlier(4 - i as i64)) {
            Ok(reading) => {
                let verdict = evaluate_temperature(reading.equipment_type, reading.value);
                println!(
                    "Logged {} {:.1}°C: {}",
                    reading.equipment_type, reading.value, verdict.message
                );
                if !verdict.compliant {
                    let draft = CorrectiveActionDraft::for_breach(&reading, &verdict, "Alex")
                        .with_notes("Reheated and re-probed at 74°C")
                        .with_root_cause("Unit switched to low")
                        .with_prevention("Check dial at every service");
                    store.record_corrective_action(draft, earlier(4 - i as i64))?;
                }
            }
            Err(e) => warn!(error = %e, "temperature entry rejected"),
        }
    }

    store.log_cooking(NewCookingEntry::new("Roast chicken", "B-104", 78.5, "Alex"), earlier(3))?;
    store.log_cooking(
        NewCookingEntry::new("Beef stew", "B-105", 72.0, "Alex").with_disposition("Returned to oven"),
        earlier(2),
    )?;

    for task in &CLEANING_TASKS[..5] {
        store.set_cleaning_task(today, task, true)?;
    }

    store.add_expiry_item("Chicken stock", today - Duration::days(4), 3)?;
    store.add_expiry_item("Rice", today - Duration::days(1), 1)?;
    store.add_expiry_item("Tomato sauce", today, 5)?;

    store.log_waste(
        NewWasteEntry::new("Bread rolls", "12", WasteReason::OverPrep).with_notes("Quiet lunch"),
        earlier(1),
    )?;

    let summary = compute_summary(&store, now)?;
    println!("\n=== Dashboard ===");
    println!("Cleaning: {}%", summary.cleaning_percent);
    if let Some(last) = &summary.last_reading {
        println!(
            "Last reading: {} {:.1}°C at {}",
            last.equipment_type,
            last.value,
            last.timestamp.format("%H:%M")
        );
    }
    println!("Expired items: {}", summary.expired_count);
    println!("Waste today: {}", summary.waste_count_today);
    for part in [DayPart::Morning, DayPart::Afternoon] {
        println!("{} check: {}", part, summary.check(part));
    }

    let report = DailyReport::assemble(&store, today, now)?;
    info!(status = %report.status, "report ready");
    println!("\n{}", report);

    Ok(())
}
