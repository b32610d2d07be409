//! Reshapes flat submitted facility fields into the nested layout stored
//! with a facility.

use serde_json::{Map, Value};

use crate::core::error::{AppError, Result};
use crate::features::facilities::models::NewFacility;

/// `(source key, abbreviated key)` pairs grouped under `defining_hours`
const DAYS: [(&str, &str); 7] = [
    ("sunday", "sun"),
    ("monday", "mon"),
    ("tuesday", "tue"),
    ("wednesday", "wed"),
    ("thursday", "thu"),
    ("friday", "fri"),
    ("saturday", "sat"),
];

/// Submitted fields plus the derived nested groups
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedFacilityInput(Map<String, Value>);

impl NormalizedFacilityInput {
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Typed insert for the facilities table; the whole normalized map is
    /// kept as `attributes`.
    pub fn to_new_facility(&self) -> Result<NewFacility> {
        let name = self
            .0
            .get("name")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::Validation("name is required".to_string()))?
            .to_string();

        Ok(NewFacility {
            name,
            lng: self.coordinate("lng", -180.0..=180.0)?,
            lat: self.coordinate("lat", -90.0..=90.0)?,
            attributes: Value::Object(self.0.clone()),
        })
    }

    fn coordinate(&self, key: &str, range: std::ops::RangeInclusive<f64>) -> Result<f64> {
        let value = self.0.get(key).and_then(as_number).ok_or_else(|| {
            AppError::Validation(format!("{} is not a number", key))
        })?;
        if !range.contains(&value) {
            return Err(AppError::Validation(format!("{} is out of range", key)));
        }
        Ok(value)
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn field(raw: &Map<String, Value>, key: &str) -> Result<Value> {
    raw.get(key)
        .cloned()
        .ok_or_else(|| AppError::Validation(format!("{} is required", key)))
}

fn group(raw: &Map<String, Value>, keys: &[(&str, &str)]) -> Result<Value> {
    let mut grouped = Map::new();
    for (source, target) in keys {
        grouped.insert(target.to_string(), field(raw, source)?);
    }
    Ok(Value::Object(grouped))
}

/// Add `lng`, `lat`, `staff`, `defining_hours` and `inpatient_service`.
///
/// Source keys stay in place; values are copied without defaulting.
pub fn normalize(raw: Map<String, Value>) -> Result<NormalizedFacilityInput> {
    let lng = field(&raw, "longitude")?;
    let lat = field(&raw, "latitude")?;
    let staff = group(&raw, &[("nurses", "nurses"), ("doctors", "doctors")])?;
    let defining_hours = group(&raw, &DAYS)?;
    let inpatient_service = group(
        &raw,
        &[
            ("full_time_beds", "full_time_beds"),
            ("part_time_beds", "part_time_beds"),
        ],
    )?;

    let mut data = raw;
    data.insert("lng".to_string(), lng);
    data.insert("lat".to_string(), lat);
    data.insert("staff".to_string(), staff);
    data.insert("defining_hours".to_string(), defining_hours);
    data.insert("inpatient_service".to_string(), inpatient_service);

    Ok(NormalizedFacilityInput(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_fields() -> Map<String, Value> {
        let Value::Object(map) = json!({
            "name": "Puskesmas Kota",
            "longitude": 10,
            "latitude": 20,
            "nurses": 2,
            "doctors": 1,
            "sunday": "closed",
            "monday": "9-5",
            "tuesday": "9-5",
            "wednesday": "9-5",
            "thursday": "9-5",
            "friday": "9-3",
            "saturday": "10-1",
            "full_time_beds": 5,
            "part_time_beds": 3
        }) else {
            unreachable!()
        };
        map
    }

    #[test]
    fn test_normalize_groups_fields() {
        let normalized = normalize(raw_fields()).unwrap();
        let data = normalized.as_map();

        assert_eq!(data["lng"], json!(10));
        assert_eq!(data["lat"], json!(20));
        assert_eq!(data["staff"], json!({"nurses": 2, "doctors": 1}));
        assert_eq!(
            data["defining_hours"],
            json!({
                "sun": "closed",
                "mon": "9-5",
                "tue": "9-5",
                "wed": "9-5",
                "thu": "9-5",
                "fri": "9-3",
                "sat": "10-1"
            })
        );
        assert_eq!(
            data["inpatient_service"],
            json!({"full_time_beds": 5, "part_time_beds": 3})
        );
    }

    #[test]
    fn test_normalize_keeps_original_keys() {
        let raw = raw_fields();
        let normalized = normalize(raw.clone()).unwrap().into_map();

        for (key, value) in &raw {
            assert_eq!(normalized.get(key), Some(value), "key {} changed", key);
        }
        assert_eq!(normalized.len(), raw.len() + 5);
    }

    #[test]
    fn test_normalize_copies_values_verbatim() {
        let mut raw = raw_fields();
        raw.insert("nurses".to_string(), json!("two"));
        raw.insert("longitude".to_string(), json!("10.5"));

        let normalized = normalize(raw).unwrap().into_map();
        assert_eq!(normalized["staff"]["nurses"], json!("two"));
        assert_eq!(normalized["lng"], json!("10.5"));
    }

    #[test]
    fn test_normalize_reports_missing_field() {
        let mut raw = raw_fields();
        raw.remove("wednesday");

        let err = normalize(raw).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == "wednesday is required"));
    }

    #[test]
    fn test_to_new_facility_reads_numbers_and_numeric_strings() {
        let mut raw = raw_fields();
        raw.insert("latitude".to_string(), json!("-6.2"));

        let new_facility = normalize(raw).unwrap().to_new_facility().unwrap();
        assert_eq!(new_facility.name, "Puskesmas Kota");
        assert_eq!(new_facility.lng, 10.0);
        assert_eq!(new_facility.lat, -6.2);
        assert_eq!(new_facility.attributes["staff"]["doctors"], json!(1));
    }

    #[test]
    fn test_to_new_facility_rejects_bad_coordinates() {
        let mut raw = raw_fields();
        raw.insert("latitude".to_string(), json!(95));
        let err = normalize(raw).unwrap().to_new_facility().unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == "lat is out of range"));

        let mut raw = raw_fields();
        raw.insert("longitude".to_string(), json!("east"));
        let err = normalize(raw).unwrap().to_new_facility().unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == "lng is not a number"));
    }

    #[test]
    fn test_to_new_facility_requires_name() {
        let mut raw = raw_fields();
        raw.insert("name".to_string(), json!("  "));
        let err = normalize(raw).unwrap().to_new_facility().unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == "name is required"));
    }
}
