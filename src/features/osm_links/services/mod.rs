mod link_unit_of_work;
mod osm_link_service;
mod osm_node_store;

pub use link_unit_of_work::{LinkUnitOfWork, PgLinkTransaction};
pub use osm_link_service::{create_linked_in, save_in, OsmLinkService};
pub use osm_node_store::OsmNodeStore;
