mod criteria;

pub use criteria::{ColisClause, ColisCriteria, ColisPredicate};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct GetColisQuery {
    pub colis_id: Uuid,
}

#[derive(Debug, Clone, Default)]
pub struct ListColisQuery {
    pub criteria: ColisCriteria,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}
