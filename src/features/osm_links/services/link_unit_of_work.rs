use async_trait::async_trait;
use geo::Point;
use serde_json::Value;
use sqlx::{PgPool, Postgres, Transaction};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::facilities::models::{Facility, NewFacility};
use crate::features::facilities::FacilityService;
use crate::features::osm_links::models::{tags_from_snapshot, FacilityOsmLink, OsmNode};
use crate::features::osm_links::services::OsmNodeStore;

/// The writes of one link save. Nothing is visible to other requests until
/// `commit`; dropping the unit without committing discards every write.
#[async_trait]
pub trait LinkUnitOfWork: OsmNodeStore {
    async fn insert_facility(&self, new_facility: &NewFacility) -> Result<Facility>;

    /// Lock the facility and return the link stored for it, if any
    async fn stored_link(&self, healthsite_id: Uuid) -> Result<Option<FacilityOsmLink>>;

    async fn upsert_link(&self, link: &FacilityOsmLink) -> Result<FacilityOsmLink>;

    async fn commit(self) -> Result<()>;
}

/// Unit of work over one Postgres transaction
pub struct PgLinkTransaction {
    tx: Mutex<Transaction<'static, Postgres>>,
}

impl PgLinkTransaction {
    pub async fn begin(pool: &PgPool) -> Result<Self> {
        let tx = pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin transaction: {:?}", e);
            AppError::Database(e)
        })?;
        Ok(Self { tx: Mutex::new(tx) })
    }
}

#[async_trait]
impl OsmNodeStore for PgLinkTransaction {
    async fn create(&self, geometry: Point<f64>, attributes: &Value) -> Result<i64> {
        let tags = Value::Object(tags_from_snapshot(attributes));
        let mut tx = self.tx.lock().await;

        let node = sqlx::query_as::<_, OsmNode>(
            r#"
            INSERT INTO osm_nodes (lng, lat, tags)
            VALUES ($1, $2, $3)
            RETURNING pk, lng, lat, tags, created_at
            "#,
        )
        .bind(geometry.x())
        .bind(geometry.y())
        .bind(&tags)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert OSM node: {:?}", e);
            AppError::ExternalServiceError(format!("OSM node creation failed: {}", e))
        })?;

        tracing::debug!(
            "OSM node {} stored at ({}, {}) with {} tags",
            node.pk,
            node.lng,
            node.lat,
            tags.as_object().map_or(0, |t| t.len())
        );

        Ok(node.pk)
    }
}

#[async_trait]
impl LinkUnitOfWork for PgLinkTransaction {
    async fn insert_facility(&self, new_facility: &NewFacility) -> Result<Facility> {
        let mut tx = self.tx.lock().await;
        FacilityService::insert(&mut **tx, new_facility).await
    }

    async fn stored_link(&self, healthsite_id: Uuid) -> Result<Option<FacilityOsmLink>> {
        let mut tx = self.tx.lock().await;

        sqlx::query_scalar::<_, Uuid>("SELECT id FROM facilities WHERE id = $1 FOR UPDATE")
            .bind(healthsite_id)
            .fetch_optional(&mut **tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Facility {} not found", healthsite_id)))?;

        let stored = sqlx::query_as::<_, FacilityOsmLink>(
            r#"
            SELECT id, healthsite_id, osm_id, osm_pk, osm_type
            FROM localities_healthsites_osm
            WHERE healthsite_id = $1
            "#,
        )
        .bind(healthsite_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to read stored OSM link: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(stored)
    }

    async fn upsert_link(&self, link: &FacilityOsmLink) -> Result<FacilityOsmLink> {
        let mut tx = self.tx.lock().await;

        sqlx::query_as::<_, FacilityOsmLink>(
            r#"
            INSERT INTO localities_healthsites_osm (healthsite_id, osm_id, osm_pk, osm_type)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (healthsite_id) DO UPDATE
            SET osm_id = EXCLUDED.osm_id,
                osm_pk = EXCLUDED.osm_pk,
                osm_type = EXCLUDED.osm_type
            RETURNING id, healthsite_id, osm_id, osm_pk, osm_type
            "#,
        )
        .bind(link.healthsite_id)
        .bind(link.osm_id)
        .bind(link.osm_pk)
        .bind(link.osm_type)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to upsert OSM link: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn commit(self) -> Result<()> {
        self.tx.into_inner().commit().await.map_err(|e| {
            tracing::error!("Failed to commit OSM link: {:?}", e);
            AppError::Database(e)
        })
    }
}
