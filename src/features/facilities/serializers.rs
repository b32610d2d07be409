//! Plain and geometry-aware serializers for facility records.

use serde_json::{json, Value};

use crate::core::error::{AppError, Result};
use crate::features::facilities::dtos::FacilityResponseDto;
use crate::features::facilities::models::FacilityRecord;
use crate::shared::api::RecordSerializer;

/// Flat JSON object per facility
pub struct FacilitySerializer;

impl RecordSerializer<FacilityRecord> for FacilitySerializer {
    fn serialize_one(&self, record: &FacilityRecord) -> Result<Value> {
        serde_json::to_value(FacilityResponseDto::from(record))
            .map_err(|e| AppError::Internal(format!("Failed to serialize facility: {}", e)))
    }
}

/// GeoJSON `Feature` per facility, `FeatureCollection` for collections
pub struct FacilityGeoSerializer;

impl RecordSerializer<FacilityRecord> for FacilityGeoSerializer {
    fn serialize_one(&self, record: &FacilityRecord) -> Result<Value> {
        let mut properties = FacilitySerializer.serialize_one(record)?;
        if let Value::Object(map) = &mut properties {
            map.remove("lng");
            map.remove("lat");
        }

        let point = record.facility.geometry();
        Ok(json!({
            "type": "Feature",
            "id": record.facility.id,
            "geometry": {
                "type": "Point",
                "coordinates": [point.x(), point.y()],
            },
            "properties": properties,
        }))
    }

    fn serialize_many(&self, records: &[FacilityRecord]) -> Result<Value> {
        let features = records
            .iter()
            .map(|record| self.serialize_one(record))
            .collect::<Result<Vec<_>>>()?;

        Ok(json!({
            "type": "FeatureCollection",
            "features": features,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::osm_links::models::OsmElementType;
    use crate::shared::api::{EncodedBody, OutputFormat, Payload, SerializerAdapter};
    use crate::shared::test_helpers::facility_record;
    use std::sync::Arc;

    #[test]
    fn test_json_contains_link_columns_and_attributes() {
        let mut record = facility_record("Klinik Sehat", 106.8, -6.2);
        record.osm_pk = Some(42);
        record.osm_type = Some(OsmElementType::Node);

        let value = FacilitySerializer.serialize_one(&record).unwrap();
        assert_eq!(value["name"], "Klinik Sehat");
        assert_eq!(value["lng"], 106.8);
        assert_eq!(value["osm_pk"], 42);
        assert_eq!(value["osm_type"], "node");
        assert_eq!(value["osm_id"], Value::Null);
        assert_eq!(value["attributes"]["staff"]["nurses"], 2);
    }

    #[test]
    fn test_geojson_feature_has_point_geometry() {
        let record = facility_record("Klinik Sehat", 106.8, -6.2);
        let feature = FacilityGeoSerializer.serialize_one(&record).unwrap();

        assert_eq!(feature["type"], "Feature");
        assert_eq!(feature["geometry"]["type"], "Point");
        assert_eq!(feature["geometry"]["coordinates"], json!([106.8, -6.2]));
        assert_eq!(feature["properties"]["name"], "Klinik Sehat");
        assert!(feature["properties"].get("lng").is_none());
    }

    #[test]
    fn test_geojson_collection() {
        let records = vec![
            facility_record("A", 1.0, 1.0),
            facility_record("B", 2.0, 2.0),
        ];
        let collection = FacilityGeoSerializer.serialize_many(&records).unwrap();
        assert_eq!(collection["type"], "FeatureCollection");
        assert_eq!(collection["features"][1]["properties"]["name"], "B");
    }

    #[test]
    fn test_facility_xml_equals_transcoded_json() {
        let adapter = SerializerAdapter::new(
            Arc::new(FacilitySerializer),
            Arc::new(FacilityGeoSerializer),
        );
        let record = facility_record("Klinik & Co", 106.8, -6.2);

        let json = FacilitySerializer.serialize_one(&record).unwrap();
        let body = adapter
            .serialize(Payload::One(&record), OutputFormat::Xml)
            .unwrap();
        assert_eq!(
            body,
            EncodedBody::Xml(crate::shared::api::xml::to_xml(&json).unwrap())
        );
    }
}
