use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::model::ApiClient;
use crate::features::facilities::dtos::{CreateFacilityDto, FacilityResponseDto};
use crate::features::facilities::models::FacilityRecord;
use crate::features::facilities::services::{normalize, FacilityService};
use crate::features::osm_links::services::OsmLinkService;
use crate::shared::api::{EncodedBody, PaginationApi, Payload, SerializerAdapter};
use crate::shared::constants::{PAGE_COUNT_HEADER, TOTAL_COUNT_HEADER};

/// State for facility handlers
#[derive(Clone)]
pub struct FacilityState {
    pub facility_service: Arc<FacilityService>,
    pub osm_link_service: Arc<OsmLinkService>,
    pub api: Arc<PaginationApi>,
    pub serializers: Arc<SerializerAdapter<FacilityRecord>>,
}

/// List facilities, one page at a time
///
/// Pages hold a fixed number of facilities ordered by name. A page past the
/// last one is returned empty.
#[utoipa::path(
    get,
    path = "/api/v2/facilities",
    params(
        ("output" = Option<String>, Query, description = "json (default), xml or geojson"),
        ("page" = Option<i64>, Query, description = "1-indexed page, default 1"),
        ("api-key" = Option<String>, Query, description = "API key, if not sent as X-API-Key")
    ),
    responses(
        (status = 200, description = "Page of facilities in the requested format", body = Vec<FacilityResponseDto>),
        (status = 400, description = "Unrecognized output or invalid page"),
        (status = 401, description = "Missing or invalid API key")
    ),
    tag = "facilities"
)]
pub async fn list_facilities(
    State(state): State<FacilityState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse> {
    let query = state.api.validate(&params)?;

    let page = state
        .api
        .paginator()
        .slice(state.facility_service.as_ref(), query.page)
        .await?;

    let body = state
        .serializers
        .serialize(Payload::Many(&page.items), query.format)?;

    Ok((
        [
            (TOTAL_COUNT_HEADER, page.total.to_string()),
            (PAGE_COUNT_HEADER, page.num_pages.to_string()),
        ],
        body,
    ))
}

/// Get a single facility
#[utoipa::path(
    get,
    path = "/api/v2/facilities/{id}",
    params(
        ("id" = Uuid, Path, description = "Facility ID"),
        ("output" = Option<String>, Query, description = "json (default), xml or geojson")
    ),
    responses(
        (status = 200, description = "Facility in the requested format", body = FacilityResponseDto),
        (status = 400, description = "Unrecognized output"),
        (status = 404, description = "Facility not found")
    ),
    tag = "facilities"
)]
pub async fn get_facility(
    State(state): State<FacilityState>,
    Path(id): Path<Uuid>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<EncodedBody> {
    let format = state.api.negotiator().negotiate(&params)?;
    let record = state.facility_service.get_record(id).await?;
    state.serializers.serialize(Payload::One(&record), format)
}

/// Create a facility from flat submitted fields
///
/// Fields are normalized before storage. The facility, its new OSM node and
/// the link between them are stored together or not at all.
#[utoipa::path(
    post,
    path = "/api/v2/facilities",
    params(
        ("output" = Option<String>, Query, description = "json (default), xml or geojson")
    ),
    request_body = CreateFacilityDto,
    responses(
        (status = 201, description = "Facility created", body = FacilityResponseDto),
        (status = 400, description = "Missing or invalid fields"),
        (status = 502, description = "OSM node could not be created")
    ),
    tag = "facilities"
)]
pub async fn create_facility(
    State(state): State<FacilityState>,
    client: ApiClient,
    Query(params): Query<HashMap<String, String>>,
    AppJson(raw): AppJson<Map<String, Value>>,
) -> Result<(StatusCode, EncodedBody)> {
    let format = state.api.negotiator().negotiate(&params)?;
    let new_facility = normalize(raw)?.to_new_facility()?;

    let record = state.osm_link_service.create_linked(new_facility).await?;

    tracing::info!(
        client = %client.key_hint,
        "Facility {} submitted, osm_pk={:?}",
        record.facility.id,
        record.osm_pk
    );

    let body = state.serializers.serialize(Payload::One(&record), format)?;
    Ok((StatusCode::CREATED, body))
}
