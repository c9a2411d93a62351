use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;
use zone_commands::CreateZoneCommand;
use zone_errors::ZoneError;
use zone_models::Zone;

use crate::{ZoneDeletionListener, ZoneRepository};

/// Process-local zone store, used by tests and local runs without a
/// database. Listeners stand in for `ON DELETE SET NULL`.
#[derive(Clone, Default)]
pub struct InMemoryZoneDao {
    zones: Arc<RwLock<HashMap<Uuid, Zone>>>,
    listeners: Vec<Arc<dyn ZoneDeletionListener>>,
}

impl InMemoryZoneDao {
    pub fn new() -> Self { Self::default() }

    pub fn with_listener(
        mut self, listener: Arc<dyn ZoneDeletionListener>,
    ) -> Self {
        self.listeners.push(listener);
        self
    }
}

#[async_trait]
impl ZoneRepository for InMemoryZoneDao {
    async fn find_by_id(&self, id: Uuid) -> Result<Zone, ZoneError> {
        self.zones
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(ZoneError::NotFound { zone_id: id })
    }

    async fn exists(&self, id: Uuid) -> Result<bool, ZoneError> {
        Ok(self.zones.read().await.contains_key(&id))
    }

    async fn all(&self) -> Result<Vec<Zone>, ZoneError> {
        let mut zones: Vec<Zone> =
            self.zones.read().await.values().cloned().collect();
        zones.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(zones)
    }

    async fn create(&self, req: CreateZoneCommand) -> Result<Zone, ZoneError> {
        let mut zones = self.zones.write().await;

        if zones.values().any(|zone| zone.name == req.name) {
            return Err(ZoneError::name_exists(&req.name));
        }

        let zone = Zone {
            id: Uuid::now_v7(),
            name: req.name,
            code: req.code,
            created_at: Utc::now(),
        };
        zones.insert(zone.id, zone.clone());

        Ok(zone)
    }

    async fn delete(&self, id: Uuid) -> Result<(), ZoneError> {
        self.zones
            .write()
            .await
            .remove(&id)
            .ok_or(ZoneError::NotFound { zone_id: id })?;

        for listener in &self.listeners {
            listener.zone_deleted(id).await;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(name: &str) -> CreateZoneCommand {
        CreateZoneCommand {
            name: name.to_string(),
            code: "13".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_find() {
        let dao = InMemoryZoneDao::new();

        let zone = dao.create(command("Marseille Nord")).await.unwrap();

        assert_eq!(dao.find_by_id(zone.id).await.unwrap(), zone);
        assert!(dao.exists(zone.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_name() {
        let dao = InMemoryZoneDao::new();
        dao.create(command("Nord")).await.unwrap();

        let err = dao.create(command("Nord")).await.unwrap_err();

        assert_eq!(err.to_string(), "Zone with name 'Nord' already exists");
    }

    #[tokio::test]
    async fn test_delete_then_missing() {
        let dao = InMemoryZoneDao::new();
        let zone = dao.create(command("Ouest")).await.unwrap();

        dao.delete(zone.id).await.unwrap();

        assert!(!dao.exists(zone.id).await.unwrap());
        assert!(matches!(
            dao.delete(zone.id).await,
            Err(ZoneError::NotFound { .. })
        ));
    }

    #[derive(Default)]
    struct Recorder(RwLock<Vec<Uuid>>);

    #[async_trait]
    impl ZoneDeletionListener for Recorder {
        async fn zone_deleted(&self, zone_id: Uuid) {
            self.0.write().await.push(zone_id);
        }
    }

    #[tokio::test]
    async fn test_listeners_see_only_successful_deletes() {
        let recorder = Arc::new(Recorder::default());
        let dao = InMemoryZoneDao::new().with_listener(recorder.clone());
        let zone = dao.create(command("Centre")).await.unwrap();

        dao.delete(zone.id).await.unwrap();
        assert!(dao.delete(zone.id).await.is_err());

        assert_eq!(*recorder.0.read().await, vec![zone.id]);
    }

    #[tokio::test]
    async fn test_all_sorted_by_name() {
        let dao = InMemoryZoneDao::new();
        for name in ["Sud", "Est", "Nord"] {
            dao.create(command(name)).await.unwrap();
        }

        let names: Vec<String> =
            dao.all().await.unwrap().into_iter().map(|z| z.name).collect();

        assert_eq!(names, vec!["Est", "Nord", "Sud"]);
    }
}
