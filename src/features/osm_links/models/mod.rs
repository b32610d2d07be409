mod facility_osm_link;
mod osm_element_type;
mod osm_node;

pub use facility_osm_link::{FacilityOsmLink, LinkState, LinkedFacility};
pub use osm_element_type::OsmElementType;
pub use osm_node::{tags_from_snapshot, OsmNode};
