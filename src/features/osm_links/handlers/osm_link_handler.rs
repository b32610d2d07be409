use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::ApiClient;
use crate::features::facilities::services::FacilityService;
use crate::features::osm_links::dtos::{LinkOsmElementDto, OsmLinkResponseDto};
use crate::features::osm_links::services::OsmLinkService;
use crate::shared::types::{ApiResponse, Meta};

/// State for OSM link handlers
#[derive(Clone)]
pub struct OsmLinkState {
    pub osm_link_service: Arc<OsmLinkService>,
    pub facility_service: Arc<FacilityService>,
}

/// List facility ↔ OSM links ordered by facility name
#[utoipa::path(
    get,
    path = "/api/v2/osm-links",
    responses(
        (status = 200, description = "All links", body = ApiResponse<Vec<OsmLinkResponseDto>>),
        (status = 401, description = "Missing or invalid API key")
    ),
    tag = "osm-links"
)]
pub async fn list_links(
    State(state): State<OsmLinkState>,
) -> Result<Json<ApiResponse<Vec<OsmLinkResponseDto>>>> {
    let links = state.osm_link_service.list().await?;
    let total = links.len() as i64;
    let dtos: Vec<OsmLinkResponseDto> = links.into_iter().map(|l| l.into()).collect();

    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

/// Link a facility to an OSM element
///
/// With `osm_id` the facility points at that element. Without it, a facility
/// that has no OSM element yet gets a newly created node.
#[utoipa::path(
    put,
    path = "/api/v2/facilities/{id}/osm-link",
    params(
        ("id" = Uuid, Path, description = "Facility ID")
    ),
    request_body = LinkOsmElementDto,
    responses(
        (status = 200, description = "Link saved", body = ApiResponse<OsmLinkResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Facility not found"),
        (status = 502, description = "OSM node could not be created")
    ),
    tag = "osm-links"
)]
pub async fn link_facility(
    State(state): State<OsmLinkState>,
    Path(id): Path<Uuid>,
    client: ApiClient,
    AppJson(dto): AppJson<LinkOsmElementDto>,
) -> Result<Json<ApiResponse<OsmLinkResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let record = state.facility_service.get_record(id).await?;
    let link = state.osm_link_service.link(&record, dto).await?;
    tracing::info!(client = %client.key_hint, "Facility {} relinked", id);

    Ok(Json(ApiResponse::success(
        Some(link.into()),
        Some("OSM link saved".to_string()),
        None,
    )))
}
