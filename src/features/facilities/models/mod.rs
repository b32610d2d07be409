mod facility;

pub use facility::{Facility, FacilityRecord, NewFacility};
