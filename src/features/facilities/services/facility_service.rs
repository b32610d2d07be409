use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::facilities::models::{Facility, FacilityRecord, NewFacility};
use crate::shared::api::PageSource;

const RECORD_COLUMNS: &str = r#"
    f.id, f.name, f.lng, f.lat, f.attributes, f.created_at, f.updated_at,
    l.osm_id, l.osm_pk, l.osm_type
"#;

/// Service for facility storage and the paginated facility listing
pub struct FacilityService {
    pool: PgPool,
}

impl FacilityService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a facility on `conn`, typically inside a caller's transaction
    pub async fn insert(conn: &mut PgConnection, new_facility: &NewFacility) -> Result<Facility> {
        let facility = sqlx::query_as::<_, Facility>(
            r#"
            INSERT INTO facilities (id, name, lng, lat, attributes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, lng, lat, attributes, created_at, updated_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(&new_facility.name)
        .bind(new_facility.lng)
        .bind(new_facility.lat)
        .bind(&new_facility.attributes)
        .fetch_one(conn)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert facility: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Facility inserted: id={}, name={}", facility.id, facility.name);

        Ok(facility)
    }

    /// Facility with its link columns
    pub async fn get_record(&self, id: Uuid) -> Result<FacilityRecord> {
        let record = sqlx::query_as::<_, FacilityRecord>(&format!(
            r#"
            SELECT {RECORD_COLUMNS}
            FROM facilities f
            LEFT JOIN localities_healthsites_osm l ON l.healthsite_id = f.id
            WHERE f.id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get facility: {:?}", e);
            AppError::Database(e)
        })?;

        record.ok_or_else(|| AppError::NotFound(format!("Facility {} not found", id)))
    }
}

#[async_trait]
impl PageSource for FacilityService {
    type Item = FacilityRecord;

    async fn count(&self) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM facilities")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count facilities: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn fetch(&self, offset: i64, limit: i64) -> Result<Vec<FacilityRecord>> {
        sqlx::query_as::<_, FacilityRecord>(&format!(
            r#"
            SELECT {RECORD_COLUMNS}
            FROM facilities f
            LEFT JOIN localities_healthsites_osm l ON l.healthsite_id = f.id
            ORDER BY f.name ASC, f.id ASC
            OFFSET $1 LIMIT $2
            "#
        ))
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list facilities: {:?}", e);
            AppError::Database(e)
        })
    }
}
