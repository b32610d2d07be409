use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;

use crate::core::config::ApiConfig;
use crate::core::middleware;
use crate::features::auth::ApiKeyValidator;
use crate::features::facilities::{
    routes as facilities_routes, FacilityGeoSerializer, FacilitySerializer, FacilityService,
    FacilityState,
};
use crate::features::osm_links::{routes as osm_links_routes, OsmLinkService, OsmLinkState};
use crate::shared::api::{PaginationApi, SerializerAdapter};

/// Services shared by the API routes
#[derive(Clone)]
pub struct AppServices {
    pub facility_service: Arc<FacilityService>,
    pub osm_link_service: Arc<OsmLinkService>,
    pub api: Arc<PaginationApi>,
    pub serializers: Arc<SerializerAdapter<crate::features::facilities::models::FacilityRecord>>,
    pub api_keys: Arc<ApiKeyValidator>,
}

impl AppServices {
    pub fn new(pool: PgPool, config: &ApiConfig) -> Self {
        let serializers = Arc::new(SerializerAdapter::new(
            Arc::new(FacilitySerializer),
            Arc::new(FacilityGeoSerializer),
        ));

        Self {
            facility_service: Arc::new(FacilityService::new(pool.clone())),
            osm_link_service: Arc::new(OsmLinkService::new(pool, serializers.json_serializer())),
            api: Arc::new(PaginationApi::new(config)),
            serializers,
            api_keys: Arc::new(ApiKeyValidator::new(config.api_keys.iter().cloned())),
        }
    }
}

/// Facility and OSM link routes behind the API-key gate
pub fn api_router(services: AppServices) -> Router {
    let facility_state = FacilityState {
        facility_service: Arc::clone(&services.facility_service),
        osm_link_service: Arc::clone(&services.osm_link_service),
        api: Arc::clone(&services.api),
        serializers: Arc::clone(&services.serializers),
    };

    let osm_link_state = OsmLinkState {
        osm_link_service: Arc::clone(&services.osm_link_service),
        facility_service: Arc::clone(&services.facility_service),
    };

    Router::new()
        .merge(facilities_routes::routes(facility_state))
        .merge(osm_links_routes::routes(osm_link_state))
        .route_layer(axum::middleware::from_fn_with_state(
            services.api_keys,
            middleware::api_key_middleware,
        ))
}
