mod memory;
mod postgres;
pub mod sql;

use async_trait::async_trait;
use colis_commands::{CreateColisCommand, UpdateColisStatusCommand};
use colis_errors::ColisError;
use colis_models::Colis;
use colis_queries::ColisPredicate;
use dao_utils::pagination::PaginationParams;
pub use memory::InMemoryColisDao;
pub use postgres::ColisDao;
use uuid::Uuid;

#[async_trait]
pub trait ColisRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Colis, ColisError>;

    /// Packages satisfying every clause of `predicate`, newest first.
    async fn find_matching(
        &self, predicate: &ColisPredicate, pagination: PaginationParams,
    ) -> Result<Vec<Colis>, ColisError>;

    /// New packages start in [`colis_models::ColisStatus::Created`].
    async fn create(
        &self, req: CreateColisCommand,
    ) -> Result<Colis, ColisError>;

    async fn update_status(
        &self, req: UpdateColisStatusCommand,
    ) -> Result<Colis, ColisError>;

    async fn delete(&self, id: Uuid) -> Result<(), ColisError>;
}
