use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use shared_models::{DoctorRecord, ScheduleDraft, ScheduleRecord};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Store request failed: {0}")]
    Backend(String),

    #[error("Malformed record: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleFilter {
    pub date: Option<NaiveDate>,
}

impl ScheduleFilter {
    pub fn on(date: NaiveDate) -> Self {
        Self { date: Some(date) }
    }

    pub fn matches(&self, record: &ScheduleRecord) -> bool {
        self.date.map_or(true, |date| record.date == date)
    }
}

/// Record store backing the scheduler.
///
/// Every call is a single request/response; failures come back as
/// [`StoreError`] and are never folded into empty results.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list_doctors(&self) -> Result<Vec<DoctorRecord>, StoreError>;

    async fn list_schedules(&self, filter: &ScheduleFilter) -> Result<Vec<ScheduleRecord>, StoreError>;

    async fn get_schedule(&self, id: &str) -> Result<Option<ScheduleRecord>, StoreError>;

    /// Returns the storage id of the new record.
    async fn create_schedule(&self, draft: &ScheduleDraft) -> Result<String, StoreError>;

    async fn update_schedule(&self, id: &str, draft: &ScheduleDraft) -> Result<(), StoreError>;

    async fn delete_schedule(&self, id: &str) -> Result<(), StoreError>;
}

pub type SharedStore = Arc<dyn RecordStore>;
