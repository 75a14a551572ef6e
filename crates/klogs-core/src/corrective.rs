//! Corrective action drafts

use crate::compliance::Verdict;
use crate::error::ValidationError;
use crate::identity::RecordId;
use crate::record::{CcpType, CorrectiveAction, ExpiryItem, TemperatureReading};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Remediation details entered after a failed compliance check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectiveActionDraft {
    pub ccp_type: CcpType,
    pub temperature: Option<f64>,
    pub action: String,
    pub notes: String,
    pub staff_name: String,
    pub root_cause: Option<String>,
    pub prevention: Option<String>,
}

impl CorrectiveActionDraft {
    pub fn new(ccp_type: CcpType, action: impl Into<String>, staff_name: impl Into<String>) -> Self {
        Self {
            ccp_type,
            temperature: None,
            action: action.into(),
            notes: String::new(),
            staff_name: staff_name.into(),
            root_cause: None,
            prevention: None,
        }
    }

    /// Draft prefilled from a breached reading and its verdict
    ///
    /// The verdict's remediation message becomes the action; staff can
    /// overwrite it before recording.
    pub fn for_breach(reading: &TemperatureReading, verdict: &Verdict, staff_name: impl Into<String>) -> Self {
        Self::new(reading.equipment_type.into(), verdict.message.clone(), staff_name)
            .with_temperature(reading.value)
    }

    /// Draft for an item found past its expiry date
    pub fn for_expired(item: &ExpiryItem, staff_name: impl Into<String>) -> Self {
        Self::new(CcpType::Expiry, format!("Discarded {}", item.item_name), staff_name)
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_root_cause(mut self, root_cause: impl Into<String>) -> Self {
        self.root_cause = Some(root_cause.into());
        self
    }

    pub fn with_prevention(mut self, prevention: impl Into<String>) -> Self {
        self.prevention = Some(prevention.into());
        self
    }

    /// Validate the draft and stamp it as a stored action
    ///
    /// Expiry actions must not carry a temperature; every other CCP must.
    pub fn into_action(self, now: NaiveDateTime) -> Result<CorrectiveAction, ValidationError> {
        ValidationError::require_text("staffName", &self.staff_name)?;
        match (self.ccp_type, self.temperature) {
            (CcpType::Expiry, Some(_)) => {
                return Err(ValidationError::new(
                    "temperature",
                    "not recorded for expiry actions",
                ));
            }
            (CcpType::Fridge | CcpType::Freezer | CcpType::HotHold, None) => {
                return Err(ValidationError::new("temperature", "is required"));
            }
            (_, Some(t)) if !t.is_finite() => {
                return Err(ValidationError::new("temperature", "must be a number"));
            }
            _ => {}
        }
        Ok(CorrectiveAction {
            id: RecordId::generate(),
            timestamp: now,
            ccp_type: self.ccp_type,
            temperature: self.temperature,
            action: self.action,
            notes: self.notes,
            staff_name: self.staff_name.trim().to_string(),
            root_cause: self.root_cause.filter(|s| !s.trim().is_empty()),
            prevention: self.prevention.filter(|s| !s.trim().is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::evaluate_temperature;
    use crate::record::{EquipmentType, NewTemperatureReading};
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, 28)
            .unwrap()
            .and_hms_opt(11, 5, 0)
            .unwrap()
    }

    #[test]
    fn test_empty_staff_name_rejected() {
        let err = CorrectiveActionDraft::new(CcpType::Fridge, "Moved stock", "   ")
            .with_temperature(9.0)
            .into_action(now())
            .unwrap_err();
        assert_eq!(err.field, "staffName");
    }

    #[test]
    fn test_temperature_presence_follows_ccp_type() {
        let err = CorrectiveActionDraft::new(CcpType::Expiry, "Binned", "Sam")
            .with_temperature(3.0)
            .into_action(now())
            .unwrap_err();
        assert_eq!(err.field, "temperature");

        let err = CorrectiveActionDraft::new(CcpType::HotHold, "Reheated", "Sam")
            .into_action(now())
            .unwrap_err();
        assert_eq!(err.field, "temperature");

        let action = CorrectiveActionDraft::new(CcpType::Expiry, "Binned", "Sam")
            .into_action(now())
            .unwrap();
        assert_eq!(action.temperature, None);
    }

    #[test]
    fn test_draft_from_breach() {
        // Compliance is evaluated on stored readings regardless of entry bounds
        let mut reading = NewTemperatureReading::new(EquipmentType::Fridge, 4.0, "F-01")
            .into_reading(now())
            .unwrap();
        reading.value = 9.0;
        let verdict = evaluate_temperature(reading.equipment_type, reading.value);

        let action = CorrectiveActionDraft::for_breach(&reading, &verdict, "Sam")
            .with_root_cause("Door left open")
            .with_prevention("")
            .into_action(now())
            .unwrap();
        assert_eq!(action.ccp_type, CcpType::Fridge);
        assert_eq!(action.temperature, Some(9.0));
        assert_eq!(action.action, verdict.message);
        assert_eq!(action.root_cause.as_deref(), Some("Door left open"));
        assert_eq!(action.prevention, None);
    }
}
