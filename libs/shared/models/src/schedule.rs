use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A committed OT booking as stored in the `schedules` collection.
///
/// Only `id` and `date` are required. Documents written by older clients
/// may lack the other fields; those default to blank, and blank times never
/// overlap anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRecord {
    pub id: String,
    #[serde(default)]
    pub patient_id: String,
    /// Surgeon reference, either an external doctor id or a storage id.
    #[serde(rename = "doctorId", default)]
    pub surgeon_id: String,
    #[serde(rename = "anaesthesiologistId", default)]
    pub anesthesiologist_id: String,
    #[serde(default)]
    pub ot_name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub surgery_type: String,
    #[serde(default)]
    pub remarks: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Field set written on create and update; everything but the storage id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDraft {
    pub patient_id: String,
    #[serde(rename = "doctorId")]
    pub surgeon_id: String,
    #[serde(rename = "anaesthesiologistId")]
    pub anesthesiologist_id: String,
    pub ot_name: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub surgery_type: String,
    pub remarks: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl ScheduleDraft {
    pub fn time_range(&self) -> String {
        format!("{}-{}", self.start_time, self.end_time)
    }

    pub fn into_record(self, id: impl Into<String>) -> ScheduleRecord {
        ScheduleRecord {
            id: id.into(),
            patient_id: self.patient_id,
            surgeon_id: self.surgeon_id,
            anesthesiologist_id: self.anesthesiologist_id,
            ot_name: self.ot_name,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            surgery_type: self.surgery_type,
            remarks: self.remarks,
            created_at: self.created_at,
        }
    }
}

impl ScheduleRecord {
    pub fn time_range(&self) -> String {
        format!("{}-{}", self.start_time, self.end_time)
    }

    pub fn to_draft(&self) -> ScheduleDraft {
        ScheduleDraft {
            patient_id: self.patient_id.clone(),
            surgeon_id: self.surgeon_id.clone(),
            anesthesiologist_id: self.anesthesiologist_id.clone(),
            ot_name: self.ot_name.clone(),
            date: self.date,
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            surgery_type: self.surgery_type.clone(),
            remarks: self.remarks.clone(),
            created_at: self.created_at,
        }
    }
}
