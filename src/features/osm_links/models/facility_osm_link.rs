use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::facilities::models::FacilityRecord;
use crate::features::osm_links::models::OsmElementType;
use crate::features::osm_links::services::OsmNodeStore;
use crate::shared::api::RecordSerializer;

/// Whether a link points at an OSM element yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkState {
    Unlinked,
    Linked,
}

/// Database model binding one facility to one OSM element
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct FacilityOsmLink {
    /// `None` until the link has been persisted
    pub id: Option<i64>,
    pub healthsite_id: Uuid,
    pub osm_id: Option<i64>,
    pub osm_pk: Option<i64>,
    pub osm_type: Option<OsmElementType>,
}

impl FacilityOsmLink {
    pub fn new(healthsite_id: Uuid) -> Self {
        Self {
            id: None,
            healthsite_id,
            osm_id: None,
            osm_pk: None,
            osm_type: None,
        }
    }

    /// Link columns of an already joined facility record
    pub fn from_record(record: &FacilityRecord) -> Self {
        Self {
            id: None,
            healthsite_id: record.facility.id,
            osm_id: record.osm_id,
            osm_pk: record.osm_pk,
            osm_type: record.osm_type,
        }
    }

    /// `osm_id` 0 is not a real OSM element and counts as unset
    pub fn state(&self) -> LinkState {
        let osm_id = self.osm_id.filter(|id| *id != 0);
        if osm_id.is_none() && self.osm_pk.is_none() {
            LinkState::Unlinked
        } else {
            LinkState::Linked
        }
    }

    /// Merge a relink request into the current link.
    ///
    /// Without `osm_id` the link is kept as is. With one, the link points at
    /// that element and takes the requested `osm_type`, keeping the current
    /// type when none is given.
    pub fn relink(mut self, osm_id: Option<i64>, osm_type: Option<OsmElementType>) -> Self {
        if let Some(osm_id) = osm_id {
            self.osm_id = Some(osm_id);
            self.osm_type = osm_type.or(self.osm_type);
        }
        self
    }

    /// Settle a requested link against the row stored for the same facility.
    ///
    /// An unlinked request adopts a stored link, so a save that lost a race
    /// does not create a second node. A linked request always wins.
    pub fn reconcile(self, stored: Option<FacilityOsmLink>) -> Self {
        match stored {
            Some(stored)
                if self.state() == LinkState::Unlinked && stored.state() == LinkState::Linked =>
            {
                stored
            }
            Some(stored) => Self {
                id: stored.id,
                ..self
            },
            None => self,
        }
    }

    /// First phase of a save: give an unlinked facility a backing OSM node.
    ///
    /// The facility is snapshotted with `serializer` and handed to `store`
    /// together with its geometry. `osm_pk` and `osm_type` are only set once
    /// the store has returned a key, so a failed creation leaves the link
    /// untouched. Linked facilities never reach the store.
    pub async fn ensure_linked<S>(
        &mut self,
        record: &FacilityRecord,
        serializer: &dyn RecordSerializer<FacilityRecord>,
        store: &S,
    ) -> Result<LinkState>
    where
        S: OsmNodeStore + ?Sized,
    {
        if self.state() == LinkState::Linked {
            return Ok(LinkState::Linked);
        }

        let snapshot = serializer.serialize_one(record)?;
        let key = store
            .create(record.facility.geometry(), &snapshot)
            .await?;

        self.osm_pk = Some(key);
        self.osm_type = Some(OsmElementType::Node);

        tracing::info!(
            "OSM node {} created for facility {}",
            key,
            record.facility.id
        );

        Ok(LinkState::Linked)
    }
}

/// A link row joined with the name of its facility
#[derive(Debug, Clone, FromRow)]
pub struct LinkedFacility {
    #[sqlx(flatten)]
    pub link: FacilityOsmLink,
    pub facility_name: String,
}
