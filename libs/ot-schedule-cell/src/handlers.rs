use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

use shared_models::error::AppError;

use crate::models::{Rejection, ScheduleCandidate, ScheduleError, ScheduleQuery};
use crate::services::SchedulingService;

#[derive(Serialize)]
struct RejectedBody<'a> {
    accepted: bool,
    #[serde(flatten)]
    rejection: &'a Rejection,
}

impl IntoResponse for ScheduleError {
    fn into_response(self) -> Response {
        match self {
            ScheduleError::Rejected(rejection) => {
                info!("Rejected booking: {}", rejection.message);
                let body = RejectedBody {
                    accepted: false,
                    rejection: &rejection,
                };
                (StatusCode::UNPROCESSABLE_ENTITY, Json(json!(body))).into_response()
            }
            ScheduleError::NotFound(_) => AppError::NotFound(self.to_string()).into_response(),
            ScheduleError::Store(err) => AppError::Database(err.to_string()).into_response(),
        }
    }
}

#[axum::debug_handler]
pub async fn list_schedules(
    State(service): State<Arc<SchedulingService>>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<Value>, ScheduleError> {
    let schedules = service.list_schedules(&query).await?;

    Ok(Json(json!({
        "schedules": schedules,
        "total": schedules.len()
    })))
}

#[axum::debug_handler]
pub async fn create_schedule(
    State(service): State<Arc<SchedulingService>>,
    Json(candidate): Json<ScheduleCandidate>,
) -> Result<(StatusCode, Json<Value>), ScheduleError> {
    let accepted = service.validate_and_commit(&candidate, None).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "accepted": true,
            "id": accepted.id
        })),
    ))
}

#[axum::debug_handler]
pub async fn check_schedule(
    State(service): State<Arc<SchedulingService>>,
    Json(candidate): Json<ScheduleCandidate>,
) -> Result<Json<Value>, ScheduleError> {
    service.check(&candidate, None).await?;

    Ok(Json(json!({
        "accepted": true,
        "committed": false
    })))
}

#[axum::debug_handler]
pub async fn check_schedule_edit(
    State(service): State<Arc<SchedulingService>>,
    Path(schedule_id): Path<String>,
    Json(candidate): Json<ScheduleCandidate>,
) -> Result<Json<Value>, ScheduleError> {
    service.check(&candidate, Some(&schedule_id)).await?;

    Ok(Json(json!({
        "accepted": true,
        "committed": false
    })))
}

#[axum::debug_handler]
pub async fn get_schedule(
    State(service): State<Arc<SchedulingService>>,
    Path(schedule_id): Path<String>,
) -> Result<Json<Value>, ScheduleError> {
    let record = service.get_schedule(&schedule_id).await?;
    Ok(Json(json!(record)))
}

#[axum::debug_handler]
pub async fn update_schedule(
    State(service): State<Arc<SchedulingService>>,
    Path(schedule_id): Path<String>,
    Json(candidate): Json<ScheduleCandidate>,
) -> Result<Json<Value>, ScheduleError> {
    let accepted = service.validate_and_commit(&candidate, Some(&schedule_id)).await?;

    Ok(Json(json!({
        "accepted": true,
        "id": accepted.id,
        "updated": accepted.updated
    })))
}

#[axum::debug_handler]
pub async fn delete_schedule(
    State(service): State<Arc<SchedulingService>>,
    Path(schedule_id): Path<String>,
) -> Result<StatusCode, ScheduleError> {
    service.delete_schedule(&schedule_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
