use async_trait::async_trait;
use geo::Point;
use serde_json::Value;

use crate::core::error::Result;

/// Store in which OSM nodes are created for unlinked facilities
#[async_trait]
pub trait OsmNodeStore: Send + Sync {
    /// Create a node at `geometry` described by `attributes`; returns its key
    async fn create(&self, geometry: Point<f64>, attributes: &Value) -> Result<i64>;
}
