use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_database::StoreError;
use shared_models::doctor::summarize_slots;
use shared_models::{DoctorRecord, TimeSlot};

/// The part a doctor plays in a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoctorRole {
    Surgeon,
    Anesthesiologist,
}

impl DoctorRole {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "surgeon" => Some(Self::Surgeon),
            "anesthesiologist" | "anaesthesiologist" => Some(Self::Anesthesiologist),
            _ => None,
        }
    }

    pub fn matches(&self, doctor: &DoctorRecord) -> bool {
        match self {
            DoctorRole::Anesthesiologist => doctor.is_anesthesiologist(),
            DoctorRole::Surgeon => !doctor.is_anesthesiologist(),
        }
    }

    fn fallback_name(&self) -> &'static str {
        match self {
            DoctorRole::Surgeon => "Selected surgeon",
            DoctorRole::Anesthesiologist => "Selected anesthesiologist",
        }
    }
}

impl fmt::Display for DoctorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DoctorRole::Surgeon => write!(f, "surgeon"),
            DoctorRole::Anesthesiologist => write!(f, "anesthesiologist"),
        }
    }
}

/// Result of resolving a doctor reference against the roster.
#[derive(Debug, Clone, Copy)]
pub enum DoctorLookup<'a> {
    Found(&'a DoctorRecord),
    Unresolved,
}

impl<'a> DoctorLookup<'a> {
    pub fn found(self) -> Option<&'a DoctorRecord> {
        match self {
            DoctorLookup::Found(doctor) => Some(doctor),
            DoctorLookup::Unresolved => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationKind {
    /// The doctor does not work on the booking's weekday.
    UnavailableDay,
    /// No working slot fully contains the booking.
    TimeMismatch,
}

/// Why a doctor cannot take a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityViolation {
    pub kind: ViolationKind,
    pub doctor_name: String,
    pub date: NaiveDate,
    pub weekday: String,
    pub requested: String,
    /// The doctor's full configured slot list, for display.
    pub slots: Vec<TimeSlot>,
}

impl AvailabilityViolation {
    pub fn message(&self, role: DoctorRole) -> String {
        let name = if self.doctor_name.trim().is_empty() {
            role.fallback_name()
        } else {
            self.doctor_name.as_str()
        };

        match self.kind {
            ViolationKind::UnavailableDay => {
                format!("{} is not available on {}.", name, self.weekday)
            }
            ViolationKind::TimeMismatch => format!(
                "{} works in: {}. Selected time {} doesn't fit.",
                name,
                summarize_slots(&self.slots),
                self.requested
            ),
        }
    }
}

#[derive(Error, Debug)]
pub enum DoctorError {
    #[error("Doctor not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DoctorListQuery {
    pub role: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityResponse {
    pub doctor_id: String,
    pub available: bool,
    pub weekday: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<ViolationKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub slots: Vec<TimeSlot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TheatreSuggestionResponse {
    pub doctor_id: String,
    pub specialization: String,
    pub theatres: Vec<String>,
}
