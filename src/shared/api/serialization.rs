use std::sync::Arc;

use axum::{
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::core::error::Result;
use crate::shared::api::negotiation::OutputFormat;
use crate::shared::api::xml;

/// A single record or a collection, mirroring a serializer's `many` flag
#[derive(Debug)]
pub enum Payload<'a, T> {
    One(&'a T),
    Many(&'a [T]),
}

impl<T> Clone for Payload<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Payload<'_, T> {}

impl<T> Payload<'_, T> {
    pub fn many(&self) -> bool {
        matches!(self, Payload::Many(_))
    }
}

/// Turns records into their structured representation
pub trait RecordSerializer<T>: Send + Sync {
    fn serialize_one(&self, record: &T) -> Result<Value>;

    fn serialize_many(&self, records: &[T]) -> Result<Value> {
        records
            .iter()
            .map(|record| self.serialize_one(record))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array)
    }

    fn serialize(&self, payload: Payload<'_, T>) -> Result<Value> {
        match payload {
            Payload::One(record) => self.serialize_one(record),
            Payload::Many(records) => self.serialize_many(records),
        }
    }
}

/// Response body in its negotiated encoding
#[derive(Debug, Clone, PartialEq)]
pub enum EncodedBody {
    Json(Value),
    GeoJson(Value),
    Xml(Vec<u8>),
}

impl EncodedBody {
    pub fn format(&self) -> OutputFormat {
        match self {
            EncodedBody::Json(_) => OutputFormat::Json,
            EncodedBody::GeoJson(_) => OutputFormat::Geojson,
            EncodedBody::Xml(_) => OutputFormat::Xml,
        }
    }
}

impl IntoResponse for EncodedBody {
    fn into_response(self) -> Response {
        let content_type = HeaderValue::from_static(self.format().content_type());
        let mut response = match self {
            EncodedBody::Json(value) | EncodedBody::GeoJson(value) => Json(value).into_response(),
            EncodedBody::Xml(bytes) => bytes.into_response(),
        };
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, content_type);
        response
    }
}

type Encoder<T> =
    for<'s, 'p> fn(&'s SerializerAdapter<T>, Payload<'p, T>) -> Result<EncodedBody>;

/// Dispatches records to the encoder of the negotiated format
pub struct SerializerAdapter<T> {
    json: Arc<dyn RecordSerializer<T>>,
    geojson: Arc<dyn RecordSerializer<T>>,
}

impl<T: 'static> SerializerAdapter<T> {
    pub fn new(json: Arc<dyn RecordSerializer<T>>, geojson: Arc<dyn RecordSerializer<T>>) -> Self {
        Self { json, geojson }
    }

    /// The plain serializer, also used for snapshots outside the read path
    pub fn json_serializer(&self) -> Arc<dyn RecordSerializer<T>> {
        Arc::clone(&self.json)
    }

    fn encoder(format: OutputFormat) -> Encoder<T> {
        match format {
            OutputFormat::Json => Self::encode_json,
            OutputFormat::Geojson => Self::encode_geojson,
            OutputFormat::Xml => Self::encode_xml,
        }
    }

    pub fn serialize(&self, payload: Payload<'_, T>, format: OutputFormat) -> Result<EncodedBody> {
        Self::encoder(format)(self, payload)
    }

    fn encode_json(&self, payload: Payload<'_, T>) -> Result<EncodedBody> {
        self.json.serialize(payload).map(EncodedBody::Json)
    }

    fn encode_geojson(&self, payload: Payload<'_, T>) -> Result<EncodedBody> {
        self.geojson.serialize(payload).map(EncodedBody::GeoJson)
    }

    fn encode_xml(&self, payload: Payload<'_, T>) -> Result<EncodedBody> {
        let data = self.json.serialize(payload)?;
        xml::to_xml(&data).map(EncodedBody::Xml)
    }
}
