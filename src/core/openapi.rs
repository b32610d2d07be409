use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::facilities::{dtos as facilities_dtos, handlers as facilities_handlers};
use crate::features::osm_links::{
    dtos as osm_links_dtos, handlers as osm_links_handlers, models as osm_links_models,
};
use crate::shared::api::OutputFormat;
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Facilities
        facilities_handlers::list_facilities,
        facilities_handlers::get_facility,
        facilities_handlers::create_facility,
        // OSM links
        osm_links_handlers::list_links,
        osm_links_handlers::link_facility,
    ),
    components(
        schemas(
            // Shared
            Meta,
            OutputFormat,
            // Facilities
            facilities_dtos::FacilityResponseDto,
            facilities_dtos::CreateFacilityDto,
            // OSM links
            osm_links_models::OsmElementType,
            osm_links_dtos::LinkOsmElementDto,
            osm_links_dtos::OsmLinkResponseDto,
            ApiResponse<osm_links_dtos::OsmLinkResponseDto>,
            ApiResponse<Vec<osm_links_dtos::OsmLinkResponseDto>>,
        )
    ),
    modifiers(&SecurityAddon),
    security(
        ("api_key_query" = []),
        ("api_key_header" = [])
    ),
    tags(
        (name = "facilities", description = "Health facility listing, detail and creation"),
        (name = "osm-links", description = "Links between facilities and OpenStreetMap elements")
    )
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key_query",
                SecurityScheme::ApiKey(ApiKey::Query(ApiKeyValue::new("api-key"))),
            );
            components.add_security_scheme(
                "api_key_header",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("X-API-Key"))),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for path in [
            "/api/v2/facilities",
            "/api/v2/facilities/{id}",
            "/api/v2/facilities/{id}/osm-link",
            "/api/v2/osm-links",
        ] {
            assert!(paths.iter().any(|p| p.as_str() == path), "{path} missing");
        }
    }

    #[test]
    fn test_create_request_schema_is_registered() {
        let doc = ApiDoc::openapi();
        let schemas = doc.components.expect("components").schemas;

        assert!(schemas.contains_key("CreateFacilityDto"));
        assert!(schemas.contains_key("OsmLinkResponseDto"));
    }

    #[test]
    fn test_info_modifier_overrides_title() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Healthsites".to_string(),
            version: "2.0.0".to_string(),
            description: "Facility API".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Healthsites");
        assert_eq!(doc.info.description.as_deref(), Some("Facility API"));
    }
}
