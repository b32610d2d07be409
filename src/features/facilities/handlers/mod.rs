mod facility_handler;

pub use facility_handler::*;
