use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use shared_models::{DoctorRecord, ScheduleDraft, ScheduleRecord};

use crate::store::{RecordStore, ScheduleFilter, StoreError};

/// Process-local record store.
#[derive(Default)]
pub struct InMemoryRecordStore {
    doctors: RwLock<Vec<DoctorRecord>>,
    schedules: RwLock<HashMap<String, ScheduleRecord>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_doctors(doctors: Vec<DoctorRecord>) -> Self {
        Self {
            doctors: RwLock::new(doctors),
            schedules: RwLock::new(HashMap::new()),
        }
    }

    pub async fn insert_doctor(&self, doctor: DoctorRecord) {
        self.doctors.write().await.push(doctor);
    }

    /// Stores a record under its own id, bypassing validation.
    pub async fn insert_schedule(&self, record: ScheduleRecord) {
        self.schedules.write().await.insert(record.id.clone(), record);
    }

    pub async fn schedule_count(&self) -> usize {
        self.schedules.read().await.len()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn list_doctors(&self) -> Result<Vec<DoctorRecord>, StoreError> {
        Ok(self.doctors.read().await.clone())
    }

    async fn list_schedules(&self, filter: &ScheduleFilter) -> Result<Vec<ScheduleRecord>, StoreError> {
        let mut records: Vec<ScheduleRecord> = self
            .schedules
            .read()
            .await
            .values()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect();

        records.sort_by(|a, b| {
            (a.date, &a.start_time, &a.id).cmp(&(b.date, &b.start_time, &b.id))
        });

        Ok(records)
    }

    async fn get_schedule(&self, id: &str) -> Result<Option<ScheduleRecord>, StoreError> {
        Ok(self.schedules.read().await.get(id).cloned())
    }

    async fn create_schedule(&self, draft: &ScheduleDraft) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        let mut draft = draft.clone();
        draft.created_at.get_or_insert_with(Utc::now);

        debug!("Creating in-memory schedule {} on {}", id, draft.date);
        self.schedules
            .write()
            .await
            .insert(id.clone(), draft.into_record(id.clone()));

        Ok(id)
    }

    async fn update_schedule(&self, id: &str, draft: &ScheduleDraft) -> Result<(), StoreError> {
        let mut schedules = self.schedules.write().await;
        let slot = schedules
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("schedule {}", id)))?;

        *slot = draft.clone().into_record(id);
        Ok(())
    }

    async fn delete_schedule(&self, id: &str) -> Result<(), StoreError> {
        self.schedules
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("schedule {}", id)))
    }
}
