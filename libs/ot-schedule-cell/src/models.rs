use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use doctor_cell::models::{AvailabilityViolation, DoctorRole, ViolationKind};
use shared_database::StoreError;
use shared_models::{ScheduleDraft, ScheduleRecord, TimeSlot};

/// A booking as submitted from the scheduling form.
///
/// Every field is optional on the wire; completeness is checked during
/// validation so that a missing field becomes a `MissingFields` rejection
/// rather than a decode error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleCandidate {
    pub surgery_type: Option<String>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub ot_name: Option<String>,
    #[serde(rename = "doctorId")]
    pub surgeon_id: Option<String>,
    #[serde(rename = "anaesthesiologistId")]
    pub anesthesiologist_id: Option<String>,
    pub patient_id: Option<String>,
    pub remarks: Option<String>,
}

fn filled(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl ScheduleCandidate {
    pub fn new(
        surgery_type: &str,
        date: NaiveDate,
        start_time: &str,
        end_time: &str,
        ot_name: &str,
        surgeon_id: &str,
    ) -> Self {
        Self {
            surgery_type: Some(surgery_type.to_string()),
            date: Some(date),
            start_time: Some(start_time.to_string()),
            end_time: Some(end_time.to_string()),
            ot_name: Some(ot_name.to_string()),
            surgeon_id: Some(surgeon_id.to_string()),
            ..Self::default()
        }
    }

    pub fn with_anesthesiologist(mut self, id: &str) -> Self {
        self.anesthesiologist_id = Some(id.to_string());
        self
    }

    pub fn with_patient(mut self, id: &str) -> Self {
        self.patient_id = Some(id.to_string());
        self
    }

    /// Form contents for editing an existing booking.
    pub fn from_record(record: &ScheduleRecord) -> Self {
        let optional = |v: &str| (!v.trim().is_empty()).then(|| v.to_string());
        Self {
            surgery_type: Some(record.surgery_type.clone()),
            date: Some(record.date),
            start_time: Some(record.start_time.clone()),
            end_time: Some(record.end_time.clone()),
            ot_name: Some(record.ot_name.clone()),
            surgeon_id: Some(record.surgeon_id.clone()),
            anesthesiologist_id: optional(&record.anesthesiologist_id),
            patient_id: optional(&record.patient_id),
            remarks: optional(&record.remarks),
        }
    }

    /// Trims every field and checks the mandatory ones: surgery type, date,
    /// start, end, OT and surgeon.
    pub fn to_draft(&self) -> Result<ScheduleDraft, Rejection> {
        let surgery_type = filled(&self.surgery_type);
        let start_time = filled(&self.start_time);
        let end_time = filled(&self.end_time);
        let ot_name = filled(&self.ot_name);
        let surgeon_id = filled(&self.surgeon_id);

        match (self.date, surgery_type, start_time, end_time, ot_name, surgeon_id) {
            (Some(date), Some(surgery_type), Some(start_time), Some(end_time), Some(ot_name), Some(surgeon_id)) => {
                Ok(ScheduleDraft {
                    patient_id: filled(&self.patient_id).unwrap_or_default(),
                    surgeon_id,
                    anesthesiologist_id: filled(&self.anesthesiologist_id).unwrap_or_default(),
                    ot_name,
                    date,
                    start_time,
                    end_time,
                    surgery_type,
                    remarks: filled(&self.remarks).unwrap_or_default(),
                    created_at: None,
                })
            }
            (date, surgery_type, start_time, end_time, ot_name, surgeon_id) => {
                let missing = [
                    ("surgeryType", surgery_type.is_none()),
                    ("date", date.is_none()),
                    ("startTime", start_time.is_none()),
                    ("endTime", end_time.is_none()),
                    ("otName", ot_name.is_none()),
                    ("doctorId", surgeon_id.is_none()),
                ]
                .into_iter()
                .filter_map(|(field, absent)| absent.then_some(field))
                .collect();
                Err(Rejection::missing_fields(missing))
            }
        }
    }
}

/// Resource axis on which two bookings collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConflictKind {
    Patient,
    Anesthesiologist,
    Surgeon,
    OperationTheatre,
}

impl ConflictKind {
    /// Checked in this order; the first hit is reported.
    pub const PRIORITY: [ConflictKind; 4] = [
        ConflictKind::Patient,
        ConflictKind::Anesthesiologist,
        ConflictKind::Surgeon,
        ConflictKind::OperationTheatre,
    ];
}

/// An existing booking that holds the same resource at an overlapping time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    pub kind: ConflictKind,
    /// The contested resource: patient id, doctor reference or OT name.
    pub resource: String,
    pub schedule_id: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
}

impl Conflict {
    pub fn new(kind: ConflictKind, resource: &str, record: &ScheduleRecord) -> Self {
        Self {
            kind,
            resource: resource.to_string(),
            schedule_id: record.id.clone(),
            date: record.date,
            start_time: record.start_time.clone(),
            end_time: record.end_time.clone(),
        }
    }

    pub fn message(&self) -> String {
        match self.kind {
            ConflictKind::Patient => format!(
                "Patient ({}) already has a surgery on {} from {}-{}.",
                self.resource, self.date, self.start_time, self.end_time
            ),
            ConflictKind::Anesthesiologist => format!(
                "Selected anesthesiologist is booked {}-{}.",
                self.start_time, self.end_time
            ),
            ConflictKind::Surgeon => format!(
                "Selected surgeon is booked {}-{}.",
                self.start_time, self.end_time
            ),
            ConflictKind::OperationTheatre => format!(
                "Operation theatre \"{}\" is already booked {}-{}.",
                self.resource, self.start_time, self.end_time
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectionReason {
    MissingFields,
    DoctorUnavailableDay,
    DoctorTimeMismatch,
    PatientConflict,
    AnesthesiologistConflict,
    SurgeonConflict,
    #[serde(rename = "OTConflict")]
    OtConflict,
}

impl RejectionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionReason::MissingFields => "MissingFields",
            RejectionReason::DoctorUnavailableDay => "DoctorUnavailableDay",
            RejectionReason::DoctorTimeMismatch => "DoctorTimeMismatch",
            RejectionReason::PatientConflict => "PatientConflict",
            RejectionReason::AnesthesiologistConflict => "AnesthesiologistConflict",
            RejectionReason::SurgeonConflict => "SurgeonConflict",
            RejectionReason::OtConflict => "OTConflict",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ConflictKind> for RejectionReason {
    fn from(kind: ConflictKind) -> Self {
        match kind {
            ConflictKind::Patient => RejectionReason::PatientConflict,
            ConflictKind::Anesthesiologist => RejectionReason::AnesthesiologistConflict,
            ConflictKind::Surgeon => RejectionReason::SurgeonConflict,
            ConflictKind::OperationTheatre => RejectionReason::OtConflict,
        }
    }
}

/// Why a booking cannot be committed, with the detail the form shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rejection {
    pub reason: RejectionReason,
    /// Set for availability failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<DoctorRole>,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_fields: Vec<&'static str>,
    /// The doctor's configured slots, for time mismatches.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub doctor_slots: Vec<TimeSlot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflict: Option<Conflict>,
}

impl Rejection {
    pub fn missing_fields(fields: Vec<&'static str>) -> Self {
        Self {
            reason: RejectionReason::MissingFields,
            role: None,
            message: "Please fill surgery, date, start, end, OT and surgeon.".to_string(),
            missing_fields: fields,
            doctor_slots: Vec::new(),
            conflict: None,
        }
    }

    pub fn unavailable(role: DoctorRole, violation: AvailabilityViolation) -> Self {
        let reason = match violation.kind {
            ViolationKind::UnavailableDay => RejectionReason::DoctorUnavailableDay,
            ViolationKind::TimeMismatch => RejectionReason::DoctorTimeMismatch,
        };
        let doctor_slots = match violation.kind {
            ViolationKind::UnavailableDay => Vec::new(),
            ViolationKind::TimeMismatch => violation.slots.clone(),
        };

        Self {
            reason,
            role: Some(role),
            message: violation.message(role),
            missing_fields: Vec::new(),
            doctor_slots,
            conflict: None,
        }
    }

    pub fn conflict(conflict: Conflict) -> Self {
        Self {
            reason: conflict.kind.into(),
            role: None,
            message: conflict.message(),
            missing_fields: Vec::new(),
            doctor_slots: Vec::new(),
            conflict: Some(conflict),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Accepted {
    pub id: String,
    /// True when an existing booking was updated in place.
    pub updated: bool,
}

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Booking rejected ({}): {}", .0.reason, .0.message)]
    Rejected(Rejection),

    #[error("Schedule not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ScheduleError {
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            ScheduleError::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }
}

impl From<Rejection> for ScheduleError {
    fn from(rejection: Rejection) -> Self {
        ScheduleError::Rejected(rejection)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleQuery {
    pub date: Option<NaiveDate>,
    /// Matches patient id, surgery type or surgeon name.
    pub search: Option<String>,
}

/// A booking with doctor references resolved to names.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleView {
    #[serde(flatten)]
    pub record: ScheduleRecord,
    pub surgeon_name: Option<String>,
    pub anesthesiologist_name: Option<String>,
}
