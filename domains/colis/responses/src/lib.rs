use colis_models::{Colis, ColisStatus, Priority};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ColisResponse {
    pub id: Uuid,
    pub description: String,
    pub weight_kg: f64,
    pub destination_city: String,
    pub destination_address: String,
    pub status: ColisStatus,
    pub priority: Priority,
    pub zone_id: Option<Uuid>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Colis> for ColisResponse {
    fn from(colis: Colis) -> Self {
        Self {
            id: colis.id,
            description: colis.description,
            weight_kg: colis.weight_kg,
            destination_city: colis.destination_city,
            destination_address: colis.destination_address,
            status: colis.status,
            priority: colis.priority,
            zone_id: colis.zone_id,
            created_at: colis.created_at,
            updated_at: colis.updated_at,
        }
    }
}
