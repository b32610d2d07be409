mod facility_service;
pub mod normalizer;

pub use facility_service::FacilityService;
pub use normalizer::{normalize, NormalizedFacilityInput};
