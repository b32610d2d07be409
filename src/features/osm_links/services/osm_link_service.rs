use std::sync::Arc;

use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::facilities::models::{FacilityRecord, NewFacility};
use crate::features::osm_links::dtos::LinkOsmElementDto;
use crate::features::osm_links::models::{FacilityOsmLink, LinkedFacility};
use crate::features::osm_links::services::{LinkUnitOfWork, PgLinkTransaction};
use crate::shared::api::RecordSerializer;

/// Links ordered by facility name, ties by link id
const LIST_LINKS_SQL: &str = r#"
    SELECT l.id, l.healthsite_id, l.osm_id, l.osm_pk, l.osm_type,
           f.name AS facility_name
    FROM localities_healthsites_osm l
    JOIN facilities f ON f.id = l.healthsite_id
    ORDER BY f.name ASC, l.id ASC
"#;

/// Service for saving and listing facility ↔ OSM links
pub struct OsmLinkService {
    pool: PgPool,
    serializer: Arc<dyn RecordSerializer<FacilityRecord>>,
}

impl OsmLinkService {
    pub fn new(pool: PgPool, serializer: Arc<dyn RecordSerializer<FacilityRecord>>) -> Self {
        Self { pool, serializer }
    }

    /// Insert a facility and its OSM node and link in one transaction
    pub async fn create_linked(&self, new_facility: NewFacility) -> Result<FacilityRecord> {
        let unit = PgLinkTransaction::begin(&self.pool).await?;
        create_linked_in(unit, self.serializer.as_ref(), &new_facility).await
    }

    /// Save a link, creating its OSM node first when it has none
    pub async fn save(
        &self,
        record: &FacilityRecord,
        link: FacilityOsmLink,
    ) -> Result<FacilityOsmLink> {
        let unit = PgLinkTransaction::begin(&self.pool).await?;
        save_in(unit, self.serializer.as_ref(), record, link).await
    }

    /// Point a facility at an existing OSM element, or give it a node
    pub async fn link(
        &self,
        record: &FacilityRecord,
        request: LinkOsmElementDto,
    ) -> Result<FacilityOsmLink> {
        let link = FacilityOsmLink::from_record(record).relink(request.osm_id, request.osm_type);
        self.save(record, link).await
    }

    /// All links, ordered by facility name
    pub async fn list(&self) -> Result<Vec<LinkedFacility>> {
        sqlx::query_as::<_, LinkedFacility>(LIST_LINKS_SQL)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list OSM links: {:?}", e);
                AppError::Database(e)
            })
    }
}

/// Save `link` within `unit` and commit.
///
/// The stored link is read under a row lock first, so concurrent saves of one
/// facility run one after the other and the later one adopts the node created
/// by the earlier. Any error leaves `unit` uncommitted.
pub async fn save_in<U>(
    unit: U,
    serializer: &dyn RecordSerializer<FacilityRecord>,
    record: &FacilityRecord,
    link: FacilityOsmLink,
) -> Result<FacilityOsmLink>
where
    U: LinkUnitOfWork,
{
    let stored = unit.stored_link(link.healthsite_id).await?;
    let mut link = link.reconcile(stored);
    link.ensure_linked(record, serializer, &unit).await?;

    let saved = unit.upsert_link(&link).await?;
    unit.commit().await?;

    tracing::info!(
        "OSM link saved: facility={}, osm_id={:?}, osm_pk={:?}, osm_type={:?}",
        saved.healthsite_id,
        saved.osm_id,
        saved.osm_pk,
        saved.osm_type
    );

    Ok(saved)
}

/// Insert a facility and save its first link within `unit`
pub async fn create_linked_in<U>(
    unit: U,
    serializer: &dyn RecordSerializer<FacilityRecord>,
    new_facility: &NewFacility,
) -> Result<FacilityRecord>
where
    U: LinkUnitOfWork,
{
    let facility = unit.insert_facility(new_facility).await?;
    let record = FacilityRecord::from(facility);
    let link = FacilityOsmLink::from_record(&record);

    let saved = save_in(unit, serializer, &record, link).await?;
    Ok(record.with_link(&saved))
}
