use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use colis_commands::{
    CreateColisCommand, DeleteColisCommand, UpdateColisStatusCommand,
};
use colis_dao::ColisRepository;
use colis_errors::ColisError;
use colis_models::{ColisStatus, Priority};
use colis_queries::{ColisCriteria, GetColisQuery, ListColisQuery};
use colis_responses::ColisResponse;
use common_errors::{AppError, ErrorBody};
use dao_utils::pagination::PaginationParams;
use serde::Deserialize;
use tracing::instrument;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;
use zone_dao::ZoneRepository;

#[derive(Clone)]
pub struct ColisServices {
    pub colis: Arc<dyn ColisRepository>,
    pub zones: Arc<dyn ZoneRepository>,
}

impl ColisServices {
    pub fn new(
        colis: Arc<dyn ColisRepository>, zones: Arc<dyn ZoneRepository>,
    ) -> Self {
        Self { colis, zones }
    }
}

/// Search filters for `GET /api/colis`. Blank `zone_id` and `city` are
/// ignored.
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct ListColisParams {
    pub status: Option<ColisStatus>,
    pub zone_id: Option<String>,
    pub city: Option<String>,
    pub priority: Option<Priority>,
    /// Defaults to 50, capped at 500
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl From<ListColisParams> for ListColisQuery {
    fn from(params: ListColisParams) -> Self {
        Self {
            criteria: ColisCriteria::new(
                params.status,
                params.zone_id,
                params.city,
                params.priority,
            ),
            limit: params.limit,
            offset: params.offset,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/colis",
    request_body = CreateColisCommand,
    responses(
        (status = 201, description = "Colis created successfully", body = ColisResponse),
        (status = 400, description = "Invalid request data or unknown zone", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "colis"
)]
#[instrument(skip_all)]
pub async fn create_colis(
    State(services): State<ColisServices>,
    payload: Result<Json<CreateColisCommand>, JsonRejection>,
) -> Result<(StatusCode, Json<ColisResponse>), AppError> {
    let Json(command) = payload?;
    command.validate()?;

    if let Some(zone_id) = command.zone_id {
        if !services.zones.exists(zone_id).await? {
            return Err(ColisError::UnknownZone { zone_id }.into());
        }
    }

    let colis = services.colis.create(command).await?;

    tracing::info!("Colis created: {}", colis.id);

    Ok((StatusCode::CREATED, Json(colis.into())))
}

#[utoipa::path(
    get,
    path = "/api/colis",
    params(
        ListColisParams
    ),
    responses(
        (status = 200, description = "Matching colis, newest first", body = Vec<ColisResponse>),
        (status = 400, description = "Invalid query parameters", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "colis"
)]
#[instrument(skip_all)]
pub async fn list_colis(
    State(services): State<ColisServices>,
    params: Result<Query<ListColisParams>, QueryRejection>,
) -> Result<Json<Vec<ColisResponse>>, AppError> {
    let Query(params) = params?;
    let query = ListColisQuery::from(params);
    let predicate = query.criteria.to_predicate();
    let pagination = PaginationParams::new(query.limit, query.offset);

    let colis = services.colis.find_matching(&predicate, pagination).await?;

    Ok(Json(colis.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/colis/{id}",
    params(
        ("id" = Uuid, Path, description = "Colis ID")
    ),
    responses(
        (status = 200, description = "Colis found", body = ColisResponse),
        (status = 400, description = "Invalid UUID format", body = ErrorBody),
        (status = 404, description = "Colis not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "colis"
)]
#[instrument(skip_all)]
pub async fn get_colis(
    State(services): State<ColisServices>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ColisResponse>, AppError> {
    let Path(colis_id) = id?;
    let query = GetColisQuery { colis_id };
    let colis = services.colis.find_by_id(query.colis_id).await?;

    Ok(Json(colis.into()))
}

#[utoipa::path(
    patch,
    path = "/api/colis/{id}/status",
    request_body = UpdateColisStatusCommand,
    params(
        ("id" = Uuid, Path, description = "Colis ID")
    ),
    responses(
        (status = 200, description = "Status updated", body = ColisResponse),
        (status = 400, description = "Invalid request data", body = ErrorBody),
        (status = 404, description = "Colis not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "colis"
)]
#[instrument(skip_all)]
pub async fn update_colis_status(
    State(services): State<ColisServices>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateColisStatusCommand>, JsonRejection>,
) -> Result<Json<ColisResponse>, AppError> {
    let Path(id) = id?;
    let Json(mut command) = payload?;
    command.colis_id = id;

    let colis = services.colis.update_status(command).await?;

    tracing::info!("Colis {} moved to {}", id, colis.status);

    Ok(Json(colis.into()))
}

#[utoipa::path(
    delete,
    path = "/api/colis/{id}",
    params(
        ("id" = Uuid, Path, description = "Colis ID")
    ),
    responses(
        (status = 204, description = "Colis deleted successfully"),
        (status = 404, description = "Colis not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "colis"
)]
#[instrument(skip_all)]
pub async fn delete_colis(
    State(services): State<ColisServices>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(colis_id) = id?;
    let command = DeleteColisCommand { colis_id };
    services.colis.delete(command.colis_id).await?;

    tracing::info!("Colis deleted: {}", colis_id);

    Ok(StatusCode::NO_CONTENT)
}
