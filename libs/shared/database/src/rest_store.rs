use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Method,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use shared_config::AppConfig;
use shared_models::{DoctorRecord, ScheduleDraft, ScheduleRecord};

use crate::rest::RestClient;
use crate::store::{RecordStore, ScheduleFilter, StoreError};

const DOCTORS_PATH: &str = "/rest/v1/doctors";
const SCHEDULES_PATH: &str = "/rest/v1/schedules";

/// [`RecordStore`] backed by the hosted document store.
pub struct RestRecordStore {
    client: RestClient,
}

impl RestRecordStore {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        Ok(Self {
            client: RestClient::new(config)?,
        })
    }

    fn representation_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));
        headers
    }

    fn schedule_path(id: &str) -> String {
        format!("{}?id=eq.{}", SCHEDULES_PATH, urlencoding::encode(id))
    }

    async fn fetch_rows(&self, path: &str) -> Result<Vec<Value>, StoreError> {
        self.client
            .request(Method::GET, path, None)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    async fn send_rows(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Vec<Value>, StoreError> {
        self.client
            .request_with_headers(method, path, body, Some(Self::representation_headers()))
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    fn draft_body(draft: &ScheduleDraft) -> Result<Value, StoreError> {
        serde_json::to_value(draft).map_err(|e| StoreError::Decode(e.to_string()))
    }
}

fn parse_rows<T: DeserializeOwned>(rows: Vec<Value>, what: &str) -> Result<Vec<T>, StoreError> {
    rows.into_iter()
        .map(serde_json::from_value)
        .collect::<Result<Vec<T>, _>>()
        .map_err(|e| StoreError::Decode(format!("Failed to parse {}: {}", what, e)))
}

fn row_id(row: &Value) -> Option<String> {
    match row.get("id")? {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

#[async_trait]
impl RecordStore for RestRecordStore {
    async fn list_doctors(&self) -> Result<Vec<DoctorRecord>, StoreError> {
        let path = format!("{}?order=doctorId.asc", DOCTORS_PATH);
        let rows = self.fetch_rows(&path).await?;
        debug!("Fetched {} doctor records", rows.len());
        parse_rows(rows, "doctors")
    }

    async fn list_schedules(&self, filter: &ScheduleFilter) -> Result<Vec<ScheduleRecord>, StoreError> {
        let path = match filter.date {
            Some(date) => format!("{}?date=eq.{}&order=startTime.asc", SCHEDULES_PATH, date),
            None => format!("{}?order=date.desc,startTime.asc", SCHEDULES_PATH),
        };
        let rows = self.fetch_rows(&path).await?;
        parse_rows(rows, "schedules")
    }

    async fn get_schedule(&self, id: &str) -> Result<Option<ScheduleRecord>, StoreError> {
        let rows = self.fetch_rows(&Self::schedule_path(id)).await?;
        Ok(parse_rows(rows, "schedule")?.into_iter().next())
    }

    async fn create_schedule(&self, draft: &ScheduleDraft) -> Result<String, StoreError> {
        let rows = self
            .send_rows(Method::POST, SCHEDULES_PATH, Some(Self::draft_body(draft)?))
            .await?;

        let id = rows
            .first()
            .and_then(row_id)
            .ok_or_else(|| StoreError::Decode("create returned no schedule id".to_string()))?;

        debug!("Schedule created with ID: {}", id);
        Ok(id)
    }

    async fn update_schedule(&self, id: &str, draft: &ScheduleDraft) -> Result<(), StoreError> {
        let rows = self
            .send_rows(Method::PATCH, &Self::schedule_path(id), Some(Self::draft_body(draft)?))
            .await?;

        if rows.is_empty() {
            warn!("Update matched no schedule with ID: {}", id);
            return Err(StoreError::NotFound(format!("schedule {}", id)));
        }
        Ok(())
    }

    async fn delete_schedule(&self, id: &str) -> Result<(), StoreError> {
        let rows = self
            .send_rows(Method::DELETE, &Self::schedule_path(id), None)
            .await?;

        if rows.is_empty() {
            return Err(StoreError::NotFound(format!("schedule {}", id)));
        }
        Ok(())
    }
}
