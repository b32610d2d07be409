use axum::{routing::get, Router};

use crate::features::facilities::handlers::{self, FacilityState};

/// Create routes for the facilities feature
///
/// The API-key gate is applied by the caller.
pub fn routes(state: FacilityState) -> Router {
    Router::new()
        .route(
            "/api/v2/facilities",
            get(handlers::list_facilities).post(handlers::create_facility),
        )
        .route("/api/v2/facilities/{id}", get(handlers::get_facility))
        .with_state(state)
}
