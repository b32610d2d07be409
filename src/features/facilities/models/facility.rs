use chrono::{DateTime, Utc};
use geo::Point;
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::osm_links::models::{FacilityOsmLink, OsmElementType};

/// Database model for a healthsite facility
#[derive(Debug, Clone, FromRow)]
pub struct Facility {
    pub id: Uuid,
    pub name: String,
    pub lng: f64,
    pub lat: f64,
    /// Normalized submitted fields, stored as submitted
    pub attributes: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Facility {
    pub fn geometry(&self) -> Point<f64> {
        Point::new(self.lng, self.lat)
    }
}

/// A facility together with the columns of its OSM link, if any
#[derive(Debug, Clone, FromRow)]
pub struct FacilityRecord {
    #[sqlx(flatten)]
    pub facility: Facility,
    pub osm_id: Option<i64>,
    pub osm_pk: Option<i64>,
    pub osm_type: Option<OsmElementType>,
}

impl FacilityRecord {
    /// Same facility with the columns of a saved link
    pub fn with_link(self, link: &FacilityOsmLink) -> Self {
        Self {
            osm_id: link.osm_id,
            osm_pk: link.osm_pk,
            osm_type: link.osm_type,
            ..self
        }
    }
}

impl From<Facility> for FacilityRecord {
    fn from(facility: Facility) -> Self {
        Self {
            facility,
            osm_id: None,
            osm_pk: None,
            osm_type: None,
        }
    }
}

/// Data for inserting a facility
#[derive(Debug, Clone, PartialEq)]
pub struct NewFacility {
    pub name: String,
    pub lng: f64,
    pub lat: f64,
    pub attributes: serde_json::Value,
}
