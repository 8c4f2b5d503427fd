use chrono::NaiveDate;
use serde_json::{json, Value};

use shared_config::{AppConfig, StoreBackend};
use shared_models::{DoctorRecord, ScheduleRecord, TimeSlot};

pub struct TestConfig {
    pub store_url: String,
    pub store_api_key: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            store_url: "http://localhost:54321".to_string(),
            store_api_key: "test-api-key".to_string(),
        }
    }
}

impl TestConfig {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            store_url: url.into(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            store_backend: StoreBackend::Rest,
            store_url: self.store_url.clone(),
            store_api_key: self.store_api_key.clone(),
            store_timeout_seconds: 5,
            api_host: "127.0.0.1".to_string(),
            api_port: 0,
        }
    }
}

/// 2024-06-03, a Monday.
pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 3).expect("valid date")
}

/// 2024-06-04, a Tuesday.
pub fn tuesday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 4).expect("valid date")
}

pub struct TestDoctor;

impl TestDoctor {
    /// Roster entry whose storage id is derived from the external id
    /// (`DOC001` is stored as `doc-doc001`).
    pub fn new(
        doctor_id: &str,
        name: &str,
        specialization: &str,
        days: &[&str],
        slots: &[(&str, &str)],
    ) -> DoctorRecord {
        DoctorRecord {
            id: format!("doc-{}", doctor_id.to_lowercase()),
            doctor_id: Some(doctor_id.to_string()),
            name: name.to_string(),
            specialization: specialization.to_string(),
            department: None,
            qualification: None,
            status: Some("Active".to_string()),
            available_days: days.iter().map(|d| d.to_string()).collect(),
            time_slots: slots.iter().map(|(from, to)| TimeSlot::new(from, to)).collect(),
        }
    }

    pub fn surgeon(doctor_id: &str, days: &[&str], slots: &[(&str, &str)]) -> DoctorRecord {
        Self::new(doctor_id, &format!("Dr. {}", doctor_id), "General Surgeon", days, slots)
    }

    pub fn anesthesiologist(doctor_id: &str, days: &[&str], slots: &[(&str, &str)]) -> DoctorRecord {
        Self::new(doctor_id, &format!("Dr. {}", doctor_id), "Anesthesiologist", days, slots)
    }
}

pub struct TestSchedule;

impl TestSchedule {
    pub fn new(
        id: &str,
        surgeon_id: &str,
        ot_name: &str,
        date: NaiveDate,
        start: &str,
        end: &str,
    ) -> ScheduleRecord {
        ScheduleRecord {
            id: id.to_string(),
            patient_id: String::new(),
            surgeon_id: surgeon_id.to_string(),
            anesthesiologist_id: String::new(),
            ot_name: ot_name.to_string(),
            date,
            start_time: start.to_string(),
            end_time: end.to_string(),
            surgery_type: "Appendectomy".to_string(),
            remarks: String::new(),
            created_at: None,
        }
    }
}

pub struct MockStoreResponses;

impl MockStoreResponses {
    pub fn doctor_document(doctor_id: &str, name: &str, specialization: &str) -> Value {
        json!({
            "id": format!("doc-{}", doctor_id.to_lowercase()),
            "doctorId": doctor_id,
            "name": name,
            "specialization": specialization,
            "department": "General Surgery",
            "status": "Active",
            "availableDays": ["Monday", "Wednesday"],
            "timeSlots": [{ "from": "09:00", "to": "13:00" }]
        })
    }

    pub fn schedule_document(id: &str, surgeon_id: &str, date: &str, start: &str, end: &str) -> Value {
        json!({
            "id": id,
            "patientId": "",
            "doctorId": surgeon_id,
            "anaesthesiologistId": "",
            "otName": "OT-1",
            "date": date,
            "startTime": start,
            "endTime": end,
            "surgeryType": "Appendectomy",
            "remarks": "",
            "createdAt": "2024-06-01T08:00:00Z"
        })
    }
}
