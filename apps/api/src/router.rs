use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use doctor_cell::router::doctor_routes;
use ot_schedule_cell::router::schedule_routes;
use ot_schedule_cell::services::SchedulingService;
use shared_database::SharedStore;

pub fn create_router(store: SharedStore) -> Router {
    let scheduling = Arc::new(SchedulingService::new(store.clone()));

    Router::new()
        .route("/", get(|| async { "OT scheduler API is running!" }))
        .nest("/doctors", doctor_routes(store))
        .nest("/schedules", schedule_routes(scheduling))
}
