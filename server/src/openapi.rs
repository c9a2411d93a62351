use utoipa::{
    OpenApi,
    openapi::{self, server::Server},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::health_check,
        zone_http::create_zone,
        zone_http::list_zones,
        zone_http::get_zone,
        zone_http::delete_zone,
        colis_http::create_colis,
        colis_http::list_colis,
        colis_http::get_colis,
        colis_http::update_colis_status,
        colis_http::delete_colis
    ),
    components(
        schemas(
            common_errors::ErrorBody,
            zone_commands::CreateZoneCommand,
            zone_responses::ZoneResponse,
            colis_commands::CreateColisCommand,
            colis_commands::UpdateColisStatusCommand,
            colis_responses::ColisResponse,
            colis_models::ColisStatus,
            colis_models::Priority,
            colis_http::ListColisParams,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "zones", description = "Delivery zone management endpoints"),
        (name = "colis", description = "Package management and search endpoints")
    ),
    info(
        title = "Smart Delivery Management System API",
        description = "REST API for managing delivery zones and packages \
                       (colis) across their delivery lifecycle",
        version = "1.0.0",
        contact(name = "SDMS Team", email = "support@sdms.local"),
        license(name = "MIT License", url = "https://opensource.org/licenses/MIT")
    )
)]
pub struct ApiDoc;

/// The generated document with a single server entry pointing at the
/// configured port.
pub fn api_doc(port: u16) -> openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.servers = Some(vec![Server::new(format!("http://localhost:{port}"))]);
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_url_uses_port() {
        let doc = api_doc(9191);
        let servers = doc.servers.unwrap();

        assert_eq!(servers.len(), 1);
        assert_eq!(servers[0].url, "http://localhost:9191");
    }

    #[test]
    fn test_info_metadata() {
        let doc = api_doc(8080);

        assert_eq!(doc.info.title, "Smart Delivery Management System API");
        assert_eq!(doc.info.version, "1.0.0");
        assert!(doc.info.description.is_some());

        let contact = doc.info.contact.unwrap();
        assert_eq!(contact.name.as_deref(), Some("SDMS Team"));
        assert_eq!(contact.email.as_deref(), Some("support@sdms.local"));

        let license = doc.info.license.unwrap();
        assert_eq!(license.name, "MIT License");
        assert_eq!(
            license.url.as_deref(),
            Some("https://opensource.org/licenses/MIT")
        );
    }

    #[test]
    fn test_documents_every_route() {
        let doc = api_doc(8080);
        let paths: Vec<&str> =
            doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/health",
            "/api/zones",
            "/api/zones/{id}",
            "/api/colis",
            "/api/colis/{id}",
            "/api/colis/{id}/status",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }
}
