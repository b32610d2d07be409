use axum::{
    routing::{get, put},
    Router,
};

use crate::features::osm_links::handlers::{self, OsmLinkState};

/// Create routes for the OSM links feature
///
/// The API-key gate is applied by the caller.
pub fn routes(state: OsmLinkState) -> Router {
    Router::new()
        .route("/api/v2/osm-links", get(handlers::list_links))
        .route(
            "/api/v2/facilities/{id}/osm-link",
            put(handlers::link_facility),
        )
        .with_state(state)
}
