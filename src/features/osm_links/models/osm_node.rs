use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::FromRow;

/// Node created in the OSM store for a facility that had no OSM element
#[derive(Debug, Clone, FromRow)]
pub struct OsmNode {
    pub pk: i64,
    pub lng: f64,
    pub lat: f64,
    #[allow(dead_code)]
    pub tags: Value,
    #[allow(dead_code)]
    pub created_at: DateTime<Utc>,
}

/// Snapshot keys that never become tags; position lives in the geometry and
/// link columns describe the node itself.
const UNTAGGED: [&str; 9] = [
    "lng",
    "lat",
    "longitude",
    "latitude",
    "osm_id",
    "osm_pk",
    "osm_type",
    "created_at",
    "updated_at",
];

/// Snapshot key whose fields are tagged without a prefix
const INLINED: &str = "attributes";

/// OSM tags for a facility snapshot.
///
/// Scalars become string tags, nested objects are flattened with `:`
/// (`staff:nurses`), arrays are joined with `;` and nulls are dropped.
pub fn tags_from_snapshot(snapshot: &Value) -> Map<String, Value> {
    let mut tags = Map::new();
    let Value::Object(fields) = snapshot else {
        return tags;
    };

    for (key, value) in fields {
        match (key.as_str(), value) {
            (INLINED, Value::Object(inner)) => {
                for (key, value) in inner {
                    if !UNTAGGED.contains(&key.as_str()) {
                        collect_tags(&mut tags, key, value);
                    }
                }
            }
            (key, _) if UNTAGGED.contains(&key) => {}
            (key, value) => collect_tags(&mut tags, key, value),
        }
    }
    tags
}

fn collect_tags(tags: &mut Map<String, Value>, key: &str, value: &Value) {
    match value {
        Value::Null => {}
        Value::Object(fields) => {
            for (child, value) in fields {
                collect_tags(tags, &format!("{}:{}", key, child), value);
            }
        }
        Value::Array(items) => {
            let joined = items
                .iter()
                .filter_map(tag_text)
                .collect::<Vec<_>>()
                .join(";");
            if !joined.is_empty() {
                tags.insert(key.to_string(), Value::String(joined));
            }
        }
        scalar => {
            if let Some(text) = tag_text(scalar) {
                tags.insert(key.to_string(), Value::String(text));
            }
        }
    }
}

fn tag_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Object(_) | Value::Array(_) => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
