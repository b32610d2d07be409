use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::features::osm_links::models::{
    FacilityOsmLink, LinkState, LinkedFacility, OsmElementType,
};

/// Request DTO for linking a facility to an OSM element
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_link_request"))]
pub struct LinkOsmElementDto {
    /// Existing OSM element id; omit to have a node created
    #[validate(range(min = 1, message = "osm_id must be a positive OSM id"))]
    pub osm_id: Option<i64>,
    pub osm_type: Option<OsmElementType>,
}

fn validate_link_request(dto: &LinkOsmElementDto) -> Result<(), ValidationError> {
    if dto.osm_type.is_some() && dto.osm_id.is_none() {
        return Err(ValidationError::new("osm_type_without_osm_id")
            .with_message("osm_type requires osm_id".into()));
    }
    Ok(())
}

/// Response DTO for a facility ↔ OSM link
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OsmLinkResponseDto {
    pub healthsite_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facility_name: Option<String>,
    pub osm_id: Option<i64>,
    pub osm_pk: Option<i64>,
    pub osm_type: Option<OsmElementType>,
    pub linked: bool,
}

impl From<FacilityOsmLink> for OsmLinkResponseDto {
    fn from(l: FacilityOsmLink) -> Self {
        Self {
            linked: l.state() == LinkState::Linked,
            healthsite_id: l.healthsite_id,
            facility_name: None,
            osm_id: l.osm_id,
            osm_pk: l.osm_pk,
            osm_type: l.osm_type,
        }
    }
}

impl From<LinkedFacility> for OsmLinkResponseDto {
    fn from(l: LinkedFacility) -> Self {
        Self {
            facility_name: Some(l.facility_name),
            ..l.link.into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_request_validation() {
        assert!(LinkOsmElementDto::default().validate().is_ok());

        let dto = LinkOsmElementDto {
            osm_id: Some(12),
            osm_type: Some(OsmElementType::Relation),
        };
        assert!(dto.validate().is_ok());

        let dto = LinkOsmElementDto {
            osm_id: Some(0),
            osm_type: None,
        };
        assert!(dto.validate().is_err());

        let dto = LinkOsmElementDto {
            osm_id: None,
            osm_type: Some(OsmElementType::Way),
        };
        let err = dto.validate().unwrap_err();
        assert!(err.to_string().contains("osm_type requires osm_id"));
    }
}
