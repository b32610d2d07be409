//! Facilities read API and facility creation.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/v2/facilities` | Paginated list (`output`, `page`) |
//! | GET | `/api/v2/facilities/{id}` | Single facility (`output`) |
//! | POST | `/api/v2/facilities` | Create from flat fields (`output`) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod serializers;
pub mod services;

pub use handlers::FacilityState;
pub use serializers::{FacilityGeoSerializer, FacilitySerializer};
pub use services::FacilityService;
