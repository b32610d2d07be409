use serde::{Deserialize, Serialize};
use sqlx::Type;
use utoipa::ToSchema;

/// OSM element kind matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "osm_element_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OsmElementType {
    Node,
    Way,
    Relation,
}

impl std::fmt::Display for OsmElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OsmElementType::Node => write!(f, "node"),
            OsmElementType::Way => write!(f, "way"),
            OsmElementType::Relation => write!(f, "relation"),
        }
    }
}
