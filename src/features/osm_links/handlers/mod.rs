mod osm_link_handler;

pub use osm_link_handler::*;
