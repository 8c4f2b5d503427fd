use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::services::SchedulingService;

pub fn schedule_routes(service: Arc<SchedulingService>) -> Router {
    Router::new()
        .route("/", get(handlers::list_schedules).post(handlers::create_schedule))
        .route("/check", post(handlers::check_schedule))
        .route(
            "/{schedule_id}",
            get(handlers::get_schedule)
                .put(handlers::update_schedule)
                .delete(handlers::delete_schedule),
        )
        .route("/{schedule_id}/check", post(handlers::check_schedule_edit))
        .with_state(service)
}
