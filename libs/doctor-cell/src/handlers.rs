use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};

use shared_database::SharedStore;
use shared_models::error::AppError;
use shared_utils::clock::weekday_name;

use crate::models::{
    AvailabilityQuery, AvailabilityResponse, DoctorError, DoctorListQuery, DoctorRole,
    TheatreSuggestionResponse,
};
use crate::services::{check_doctor_availability, suggest_theatres, DoctorRoster};

impl From<DoctorError> for AppError {
    fn from(err: DoctorError) -> Self {
        match err {
            DoctorError::NotFound(_) => AppError::NotFound(err.to_string()),
            DoctorError::ValidationError(msg) => AppError::BadRequest(msg),
            DoctorError::Store(e) => AppError::Database(e.to_string()),
        }
    }
}

async fn load_roster(store: &SharedStore) -> Result<DoctorRoster, DoctorError> {
    Ok(DoctorRoster::load(store.as_ref()).await?)
}

#[axum::debug_handler]
pub async fn list_doctors(
    State(store): State<SharedStore>,
    Query(query): Query<DoctorListQuery>,
) -> Result<Json<Value>, AppError> {
    let roster = load_roster(&store).await?;

    let role = match query.role.as_deref().filter(|r| !r.trim().is_empty()) {
        Some(raw) => Some(DoctorRole::parse(raw).ok_or_else(|| {
            DoctorError::ValidationError(format!("Unknown role '{}'", raw))
        })?),
        None => None,
    };
    let search = query
        .search
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    let doctors: Vec<_> = roster
        .doctors()
        .iter()
        .filter(|doctor| role.map_or(true, |role| role.matches(doctor)))
        .filter(|doctor| {
            search
                .as_deref()
                .map_or(true, |needle| doctor.name.to_lowercase().contains(needle))
        })
        .collect();

    Ok(Json(json!({
        "doctors": doctors,
        "total": doctors.len()
    })))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(store): State<SharedStore>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let roster = load_roster(&store).await?;

    let doctor = roster
        .get(&doctor_id)
        .ok_or_else(|| DoctorError::NotFound(doctor_id.clone()))?;

    Ok(Json(json!(doctor)))
}

#[axum::debug_handler]
pub async fn check_availability(
    State(store): State<SharedStore>,
    Path(doctor_id): Path<String>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let roster = load_roster(&store).await?;

    let doctor = roster
        .get(&doctor_id)
        .ok_or_else(|| DoctorError::NotFound(doctor_id.clone()))?;

    let response = match check_doctor_availability(doctor, query.date, &query.start, &query.end) {
        Ok(()) => AvailabilityResponse {
            doctor_id: doctor.booking_key().to_string(),
            available: true,
            weekday: weekday_name(query.date).to_string(),
            reason: None,
            message: None,
            slots: doctor.time_slots.clone(),
        },
        Err(violation) => {
            let role = if doctor.is_anesthesiologist() {
                DoctorRole::Anesthesiologist
            } else {
                DoctorRole::Surgeon
            };
            AvailabilityResponse {
                doctor_id: doctor.booking_key().to_string(),
                available: false,
                weekday: violation.weekday.clone(),
                reason: Some(violation.kind),
                message: Some(violation.message(role)),
                slots: violation.slots,
            }
        }
    };

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn get_theatre_suggestions(
    State(store): State<SharedStore>,
    Path(doctor_id): Path<String>,
) -> Result<Json<TheatreSuggestionResponse>, AppError> {
    let roster = load_roster(&store).await?;

    let doctor = roster
        .get(&doctor_id)
        .ok_or_else(|| DoctorError::NotFound(doctor_id.clone()))?;

    Ok(Json(TheatreSuggestionResponse {
        doctor_id: doctor.booking_key().to_string(),
        specialization: doctor.specialization.clone(),
        theatres: suggest_theatres(&doctor.specialization)
            .iter()
            .map(|t| t.to_string())
            .collect(),
    }))
}
