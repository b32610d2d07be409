//! Facility ↔ OpenStreetMap links.
//!
//! Every facility has at most one link. Saving a link that has neither an
//! `osm_id` nor an `osm_pk` first creates an OSM node for the facility and
//! records its key; both writes commit in one transaction.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/v2/osm-links` | All links ordered by facility name |
//! | PUT | `/api/v2/facilities/{id}/osm-link` | Link to an OSM element or create a node |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use handlers::OsmLinkState;
pub use services::OsmLinkService;
