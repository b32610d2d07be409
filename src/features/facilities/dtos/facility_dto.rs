use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::facilities::models::FacilityRecord;
use crate::features::osm_links::models::OsmElementType;

/// JSON representation of a facility record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FacilityResponseDto {
    pub uuid: Uuid,
    pub name: String,
    pub lng: f64,
    pub lat: f64,
    pub osm_id: Option<i64>,
    pub osm_pk: Option<i64>,
    pub osm_type: Option<OsmElementType>,
    /// Normalized fields as submitted (staff, defining_hours, inpatient_service, ...)
    #[schema(value_type = Object)]
    pub attributes: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&FacilityRecord> for FacilityResponseDto {
    fn from(r: &FacilityRecord) -> Self {
        Self {
            uuid: r.facility.id,
            name: r.facility.name.clone(),
            lng: r.facility.lng,
            lat: r.facility.lat,
            osm_id: r.osm_id,
            osm_pk: r.osm_pk,
            osm_type: r.osm_type,
            attributes: r.facility.attributes.clone(),
            created_at: r.facility.created_at,
            updated_at: r.facility.updated_at,
        }
    }
}

/// Flat fields accepted when creating a facility.
///
/// Extra keys are kept in `attributes`. Values may be numbers or numeric
/// strings where a number is expected, so the body is read as a JSON map
/// and this type only documents the request schema.
#[derive(Debug, Clone, ToSchema)]
pub struct CreateFacilityDto {
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
    pub nurses: i64,
    pub doctors: i64,
    pub sunday: String,
    pub monday: String,
    pub tuesday: String,
    pub wednesday: String,
    pub thursday: String,
    pub friday: String,
    pub saturday: String,
    pub full_time_beds: i64,
    pub part_time_beds: i64,
}
