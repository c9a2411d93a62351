use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateZoneCommand {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Zone name must be between 1 and 100 characters"
    ))]
    pub name: String,
    #[validate(length(
        min = 1,
        max = 20,
        message = "Zone code must be between 1 and 20 characters"
    ))]
    pub code: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteZoneCommand {
    pub zone_id: Uuid,
}
