pub mod auth;
pub mod facilities;
pub mod osm_links;
