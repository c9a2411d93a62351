use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use common_errors::{AppError, ErrorBody};
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;
use zone_commands::{CreateZoneCommand, DeleteZoneCommand};
use zone_dao::ZoneRepository;
use zone_responses::ZoneResponse;

#[derive(Clone)]
pub struct ZoneServices {
    pub zones: Arc<dyn ZoneRepository>,
}

impl ZoneServices {
    pub fn new(zones: Arc<dyn ZoneRepository>) -> Self { Self { zones } }
}

#[utoipa::path(
    post,
    path = "/api/zones",
    request_body = CreateZoneCommand,
    responses(
        (status = 201, description = "Zone created successfully", body = ZoneResponse),
        (status = 400, description = "Invalid request data", body = ErrorBody),
        (status = 409, description = "Zone name already exists", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "zones"
)]
#[instrument(skip_all)]
pub async fn create_zone(
    State(services): State<ZoneServices>,
    payload: Result<Json<CreateZoneCommand>, JsonRejection>,
) -> Result<(StatusCode, Json<ZoneResponse>), AppError> {
    let Json(command) = payload?;
    command.validate()?;

    let zone = services.zones.create(command).await?;

    tracing::info!("Zone created: {}", zone.id);

    Ok((StatusCode::CREATED, Json(zone.into())))
}

#[utoipa::path(
    get,
    path = "/api/zones",
    responses(
        (status = 200, description = "Zones ordered by name", body = Vec<ZoneResponse>),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "zones"
)]
#[instrument(skip_all)]
pub async fn list_zones(
    State(services): State<ZoneServices>,
) -> Result<Json<Vec<ZoneResponse>>, AppError> {
    let zones = services.zones.all().await?;

    Ok(Json(zones.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/zones/{id}",
    params(
        ("id" = Uuid, Path, description = "Zone ID")
    ),
    responses(
        (status = 200, description = "Zone found", body = ZoneResponse),
        (status = 400, description = "Invalid UUID format", body = ErrorBody),
        (status = 404, description = "Zone not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "zones"
)]
#[instrument(skip_all)]
pub async fn get_zone(
    State(services): State<ZoneServices>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ZoneResponse>, AppError> {
    let Path(id) = id?;
    let zone = services.zones.find_by_id(id).await?;

    Ok(Json(zone.into()))
}

#[utoipa::path(
    delete,
    path = "/api/zones/{id}",
    params(
        ("id" = Uuid, Path, description = "Zone ID")
    ),
    responses(
        (status = 204, description = "Zone deleted successfully"),
        (status = 404, description = "Zone not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "zones"
)]
#[instrument(skip_all)]
pub async fn delete_zone(
    State(services): State<ZoneServices>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(zone_id) = id?;
    let command = DeleteZoneCommand { zone_id };
    services.zones.delete(command.zone_id).await?;

    tracing::info!("Zone deleted: {}", zone_id);

    Ok(StatusCode::NO_CONTENT)
}
