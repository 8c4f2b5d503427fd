use std::fmt;

use serde::{Deserialize, Serialize};

/// One working window of a doctor, in `"HH:MM"` wall-clock form.
///
/// Either endpoint may be missing in stored documents; such a slot is kept
/// for display but never satisfies an availability check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
}

impl TimeSlot {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: Some(from.to_string()),
            to: Some(to.to_string()),
        }
    }

    /// Both endpoints, if present and non-blank.
    pub fn endpoints(&self) -> Option<(&str, &str)> {
        let from = self.from.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let to = self.to.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        Some((from, to))
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.from.as_deref().unwrap_or("?"),
            self.to.as_deref().unwrap_or("?")
        )
    }
}

/// Comma-separated slot list for messages.
pub fn summarize_slots(slots: &[TimeSlot]) -> String {
    if slots.is_empty() {
        return "No slots configured".to_string();
    }
    slots
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A roster entry as stored in the `doctors` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorRecord {
    /// Storage-assigned document id.
    #[serde(default)]
    pub id: String,
    /// Stable external id, e.g. `DOC001`.
    #[serde(default)]
    pub doctor_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub specialization: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub qualification: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    /// Weekday names, e.g. `"Monday"`.
    #[serde(default)]
    pub available_days: Vec<String>,
    #[serde(default)]
    pub time_slots: Vec<TimeSlot>,
}

impl DoctorRecord {
    pub fn external_id(&self) -> Option<&str> {
        self.doctor_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    /// The id booking forms submit for this doctor: the external id when
    /// one is set, the storage id otherwise.
    pub fn booking_key(&self) -> &str {
        self.external_id().unwrap_or(&self.id)
    }

    pub fn is_anesthesiologist(&self) -> bool {
        let spec = self.specialization.to_lowercase();
        spec.contains("anaes") || spec.contains("anesth")
    }

    pub fn works_on(&self, weekday: &str) -> bool {
        self.available_days
            .iter()
            .any(|day| day.trim().eq_ignore_ascii_case(weekday))
    }
}
