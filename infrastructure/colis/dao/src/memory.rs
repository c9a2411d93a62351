use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::Utc;
use colis_commands::{CreateColisCommand, UpdateColisStatusCommand};
use colis_errors::ColisError;
use colis_models::{Colis, ColisStatus};
use colis_queries::ColisPredicate;
use dao_utils::pagination::PaginationParams;
use tokio::sync::RwLock;
use uuid::Uuid;
use zone_dao::ZoneDeletionListener;

use crate::ColisRepository;

/// Process-local package store. Zone existence is not checked here; the
/// caller validates zone references before creating.
#[derive(Clone, Default)]
pub struct InMemoryColisDao {
    colis: Arc<RwLock<HashMap<Uuid, Colis>>>,
}

impl InMemoryColisDao {
    pub fn new() -> Self { Self::default() }

    pub async fn insert(&self, colis: Colis) {
        self.colis.write().await.insert(colis.id, colis);
    }
}

/// Mirrors the `ON DELETE SET NULL` on `colis.zone_id`.
#[async_trait]
impl ZoneDeletionListener for InMemoryColisDao {
    async fn zone_deleted(&self, zone_id: Uuid) {
        for colis in self.colis.write().await.values_mut() {
            if colis.zone_id == Some(zone_id) {
                colis.zone_id = None;
            }
        }
    }
}

#[async_trait]
impl ColisRepository for InMemoryColisDao {
    async fn find_by_id(&self, id: Uuid) -> Result<Colis, ColisError> {
        self.colis
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(ColisError::NotFound { colis_id: id })
    }

    async fn find_matching(
        &self, predicate: &ColisPredicate, pagination: PaginationParams,
    ) -> Result<Vec<Colis>, ColisError> {
        let mut matching: Vec<Colis> = self
            .colis
            .read()
            .await
            .values()
            .filter(|colis| predicate.matches(colis))
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id))
        });

        Ok(pagination.window(matching))
    }

    async fn create(
        &self, req: CreateColisCommand,
    ) -> Result<Colis, ColisError> {
        let now = Utc::now();
        let colis = Colis {
            id: Uuid::now_v7(),
            description: req.description,
            weight_kg: req.weight_kg,
            destination_city: req.destination_city,
            destination_address: req.destination_address,
            status: ColisStatus::Created,
            priority: req.priority,
            zone_id: req.zone_id,
            created_at: now,
            updated_at: now,
        };
        self.insert(colis.clone()).await;

        Ok(colis)
    }

    async fn update_status(
        &self, req: UpdateColisStatusCommand,
    ) -> Result<Colis, ColisError> {
        let mut store = self.colis.write().await;
        let colis = store
            .get_mut(&req.colis_id)
            .ok_or(ColisError::NotFound {
                colis_id: req.colis_id,
            })?;

        colis.status = req.status;
        colis.updated_at = Utc::now();

        Ok(colis.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), ColisError> {
        self.colis
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(ColisError::NotFound { colis_id: id })
    }
}
