mod osm_link_dto;

pub use osm_link_dto::{LinkOsmElementDto, OsmLinkResponseDto};
