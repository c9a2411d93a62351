mod memory;
mod postgres;

use async_trait::async_trait;
pub use memory::InMemoryZoneDao;
pub use postgres::ZoneDao;
use uuid::Uuid;
use zone_commands::CreateZoneCommand;
use zone_errors::ZoneError;
use zone_models::Zone;

#[async_trait]
pub trait ZoneRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Zone, ZoneError>;

    async fn exists(&self, id: Uuid) -> Result<bool, ZoneError>;

    /// All zones ordered by name.
    async fn all(&self) -> Result<Vec<Zone>, ZoneError>;

    /// Fails with [`ZoneError::NameExists`] when the name is taken.
    async fn create(&self, req: CreateZoneCommand) -> Result<Zone, ZoneError>;

    async fn delete(&self, id: Uuid) -> Result<(), ZoneError>;
}

/// Notified after a zone is removed from a store without foreign keys, so
/// records pointing at it can drop the reference.
#[async_trait]
pub trait ZoneDeletionListener: Send + Sync {
    async fn zone_deleted(&self, zone_id: Uuid);
}
