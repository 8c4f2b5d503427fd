use axum::{routing::get, Router};

use shared_database::SharedStore;

use crate::handlers;

pub fn doctor_routes(store: SharedStore) -> Router {
    // Roster is read-only from the scheduler's side
    Router::new()
        .route("/", get(handlers::list_doctors))
        .route("/{doctor_id}", get(handlers::get_doctor))
        .route("/{doctor_id}/availability", get(handlers::check_availability))
        .route("/{doctor_id}/theatres", get(handlers::get_theatre_suggestions))
        .with_state(store)
}
