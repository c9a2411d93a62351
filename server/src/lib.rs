pub mod config;
pub mod cors;
pub mod openapi;

use std::sync::Arc;

use axum::{
    Json, Router,
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::{get, patch, post},
};
use colis_dao::{ColisRepository, InMemoryColisDao};
use colis_http::ColisServices;
use config::ServerConfig;
use cors::{CorsPolicy, enforce_origin};
use sql_connection::SqlConnect;
use tower_http::trace::TraceLayer;
use utoipa_rapidoc::RapiDoc;
use zone_dao::{InMemoryZoneDao, ZoneRepository};
use zone_http::ZoneServices;

/// Repositories shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub zones: Arc<dyn ZoneRepository>,
    pub colis: Arc<dyn ColisRepository>,
}

impl AppState {
    pub fn postgres(db: SqlConnect) -> Self {
        Self {
            zones: Arc::new(zone_dao::ZoneDao::new(db.clone())),
            colis: Arc::new(colis_dao::ColisDao::new(db)),
        }
    }

    pub fn in_memory() -> Self {
        let colis = InMemoryColisDao::new();
        let zones =
            InMemoryZoneDao::new().with_listener(Arc::new(colis.clone()));

        Self {
            zones: Arc::new(zones),
            colis: Arc::new(colis),
        }
    }
}

pub fn build_app(state: AppState, config: &ServerConfig) -> Router {
    let zone_services = ZoneServices::new(state.zones.clone());
    let colis_services = ColisServices::new(state.colis, state.zones);

    let api_routes = Router::new()
        .route("/api/zones", post(zone_http::create_zone))
        .route("/api/zones", get(zone_http::list_zones))
        .route(
            "/api/zones/{id}",
            get(zone_http::get_zone).delete(zone_http::delete_zone),
        )
        .with_state(zone_services)
        .route("/api/colis", post(colis_http::create_colis))
        .route("/api/colis", get(colis_http::list_colis))
        .route(
            "/api/colis/{id}",
            get(colis_http::get_colis).delete(colis_http::delete_colis),
        )
        .route(
            "/api/colis/{id}/status",
            patch(colis_http::update_colis_status),
        )
        .with_state(colis_services);

    let doc = openapi::api_doc(config.port);
    let policy = Arc::new(CorsPolicy::default());

    Router::new()
        .route("/health", get(health_check))
        .merge(api_routes)
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/docs"))
        .route("/api-docs/openapi.json", get(move || async move { Json(doc) }))
        .layer(policy.layer())
        .layer(from_fn_with_state(policy, enforce_origin))
        .layer(TraceLayer::new_for_http())
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = String)
    ),
    tag = "health"
)]
pub async fn health_check() -> impl IntoResponse { "OK" }
