//! Compliance evaluation for Critical Control Points
//!
//! Two distinct policies apply to temperatures:
//! - Entry validation (`validate_temperature_input`) is a narrow sanity
//!   check applied before a reading is stored. Fridge entries must be
//!   0–5°C, freezer entries at or below -18°C.
//! - Compliance evaluation (`evaluate_temperature`) applies the regulatory
//!   limits to any reading, stored or not. Fridges pass up to 8°C.

use crate::error::ValidationError;
use crate::record::{EquipmentType, ExpiryStatus};
use crate::time::days_between;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Highest compliant fridge temperature, °C
pub const FRIDGE_MAX: f64 = 8.0;
/// Highest compliant freezer temperature, °C
pub const FREEZER_MAX: f64 = -18.0;
/// Lowest compliant hot-hold temperature, °C
pub const HOT_HOLD_MIN: f64 = 63.0;

/// Accepted range for a fridge reading at entry time, °C
pub const FRIDGE_ENTRY_RANGE: (f64, f64) = (0.0, 5.0);

/// Outcome of a compliance check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub compliant: bool,
    /// What staff should read; on a breach, the remediation to carry out
    pub message: String,
}

impl Verdict {
    fn pass(message: &str) -> Self {
        Self {
            compliant: true,
            message: message.to_string(),
        }
    }

    fn breach(message: &str) -> Self {
        Self {
            compliant: false,
            message: message.to_string(),
        }
    }
}

/// Check a reading against the CCP limit for its equipment
///
/// # Example
///
/// ```
/// use klogs_core::{evaluate_temperature, EquipmentType};
///
/// assert!(evaluate_temperature(EquipmentType::Fridge, 8.0).compliant);
/// assert!(!evaluate_temperature(EquipmentType::HotHold, 62.9).compliant);
/// ```
pub fn evaluate_temperature(equipment: EquipmentType, value: f64) -> Verdict {
    match equipment {
        EquipmentType::Fridge if value <= FRIDGE_MAX => {
            Verdict::pass("Fridge within limit (8°C or below).")
        }
        EquipmentType::Fridge => Verdict::breach(
            "Fridge above 8°C. Discard high-risk food held above 8°C for more than 4 hours \
             and adjust the unit.",
        ),
        EquipmentType::Freezer if value <= FREEZER_MAX => {
            Verdict::pass("Freezer within limit (-18°C or below).")
        }
        EquipmentType::Freezer => Verdict::breach(
            "Freezer above -18°C. Discard any thawed or soft food and adjust the unit.",
        ),
        EquipmentType::HotHold if value >= HOT_HOLD_MIN => {
            Verdict::pass("Hot hold within limit (63°C or above).")
        }
        EquipmentType::HotHold => Verdict::breach(
            "Hot hold below 63°C. Reheat to 70°C for 2 minutes, or discard food held \
             below 63°C for more than 2 hours.",
        ),
    }
}

/// Sanity-check a reading typed in by an operator
///
/// Rejected readings are never stored.
pub fn validate_temperature_input(equipment: EquipmentType, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::new("value", "Enter a valid number"));
    }
    match equipment {
        EquipmentType::Fridge => {
            let (low, high) = FRIDGE_ENTRY_RANGE;
            if value < low || value > high {
                return Err(ValidationError::new("value", "Fridge must be 0°C to 5°C"));
            }
        }
        EquipmentType::Freezer => {
            if value > FREEZER_MAX {
                return Err(ValidationError::new("value", "Freezer must be -18°C or below"));
            }
        }
        EquipmentType::HotHold => {}
    }
    Ok(())
}

/// Classify an item's freshness on a given day
///
/// Both dates are calendar days, so the time of day a check runs never
/// changes the outcome.
pub fn classify_expiry(expiry_date: NaiveDate, today: NaiveDate) -> ExpiryStatus {
    match days_between(today, expiry_date) {
        d if d < 0 => ExpiryStatus::Expired,
        0 | 1 => ExpiryStatus::ExpiresSoon,
        _ => ExpiryStatus::Active,
    }
}

/// Check a cooked item's core temperature against its target
pub fn evaluate_cooking(target: f64, actual: f64) -> Verdict {
    if actual >= target {
        Verdict::pass("Core temperature reached target.")
    } else {
        Verdict::breach("Core temperature below target. Continue cooking and re-probe before release.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_fridge_threshold() {
        for v in [-5.0, 0.0, 4.9, 7.99, 8.0, 8.01, 9.0, 25.0] {
            assert_eq!(evaluate_temperature(EquipmentType::Fridge, v).compliant, v <= 8.0, "{v}");
        }
        let breach = evaluate_temperature(EquipmentType::Fridge, 9.0);
        assert!(breach.message.contains("4 hours"));
        assert!(breach.message.contains("adjust the unit"));
    }

    #[test]
    fn test_freezer_threshold() {
        for v in [-30.0, -18.0, -17.9, 0.0] {
            assert_eq!(evaluate_temperature(EquipmentType::Freezer, v).compliant, v <= -18.0, "{v}");
        }
        assert!(evaluate_temperature(EquipmentType::Freezer, -10.0)
            .message
            .contains("thawed"));
    }

    #[test]
    fn test_hot_hold_threshold() {
        for v in [50.0, 62.9, 63.0, 75.0] {
            assert_eq!(evaluate_temperature(EquipmentType::HotHold, v).compliant, v >= 63.0, "{v}");
        }
        let breach = evaluate_temperature(EquipmentType::HotHold, 55.0);
        assert!(breach.message.contains("70°C for 2 minutes"));
        assert!(breach.message.contains("2 hours"));
    }

    #[test]
    fn test_nan_is_never_compliant() {
        assert!(!evaluate_temperature(EquipmentType::Fridge, f64::NAN).compliant);
        assert!(!evaluate_temperature(EquipmentType::HotHold, f64::NAN).compliant);
    }

    #[test]
    fn test_entry_validation() {
        assert!(validate_temperature_input(EquipmentType::Fridge, 0.0).is_ok());
        assert!(validate_temperature_input(EquipmentType::Fridge, 5.0).is_ok());
        assert!(validate_temperature_input(EquipmentType::Fridge, -0.5).is_err());
        assert!(validate_temperature_input(EquipmentType::Fridge, 9.0).is_err());
        assert!(validate_temperature_input(EquipmentType::Freezer, -18.0).is_ok());
        assert!(validate_temperature_input(EquipmentType::Freezer, -17.0).is_err());
        assert!(validate_temperature_input(EquipmentType::HotHold, 40.0).is_ok());
        assert!(validate_temperature_input(EquipmentType::HotHold, f64::INFINITY).is_err());
    }

    #[test]
    fn test_entry_validation_is_stricter_than_compliance() {
        // 6°C passes compliance but is rejected at entry
        assert!(evaluate_temperature(EquipmentType::Fridge, 6.0).compliant);
        assert!(validate_temperature_input(EquipmentType::Fridge, 6.0).is_err());
    }

    #[test]
    fn test_classify_expiry() {
        let today = date(2026, 2, 28);
        assert_eq!(classify_expiry(date(2026, 2, 28), today), ExpiryStatus::ExpiresSoon);
        assert_eq!(classify_expiry(date(2026, 3, 1), today), ExpiryStatus::ExpiresSoon);
        assert_eq!(classify_expiry(date(2026, 3, 2), today), ExpiryStatus::Active);
        assert_eq!(classify_expiry(date(2026, 2, 27), today), ExpiryStatus::Expired);
    }

    #[test]
    fn test_classify_expiry_is_idempotent() {
        let (exp, today) = (date(2026, 3, 1), date(2026, 2, 28));
        let first = classify_expiry(exp, today);
        for _ in 0..3 {
            assert_eq!(classify_expiry(exp, today), first);
        }
    }

    #[test]
    fn test_evaluate_cooking() {
        assert!(evaluate_cooking(75.0, 75.0).compliant);
        assert!(!evaluate_cooking(75.0, 71.2).compliant);
    }
}
