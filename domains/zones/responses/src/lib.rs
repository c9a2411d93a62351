use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ZoneResponse {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<zone_models::Zone> for ZoneResponse {
    fn from(zone: zone_models::Zone) -> Self {
        Self {
            id: zone.id,
            name: zone.name,
            code: zone.code,
            created_at: zone.created_at,
        }
    }
}
