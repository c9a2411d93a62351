use async_trait::async_trait;
use chrono::Utc;
use dao_utils::query_helpers::first_row_or_not_found;
use sql_connection::SqlConnect;
use tracing::instrument;
use uuid::Uuid;
use zone_commands::CreateZoneCommand;
use zone_errors::ZoneError;
use zone_models::Zone;

use crate::ZoneRepository;

const ZONE_COLUMNS: &str = "id, name, code, created_at";

#[derive(Clone)]
pub struct ZoneDao {
    db: SqlConnect,
}

impl ZoneDao {
    pub fn new(db: SqlConnect) -> Self { Self { db } }

    fn map_row(row: &tokio_postgres::Row) -> Zone {
        Zone {
            id: row.get(0),
            name: row.get(1),
            code: row.get(2),
            created_at: row.get(3),
        }
    }
}

#[async_trait]
impl ZoneRepository for ZoneDao {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Zone, ZoneError> {
        let client = self.db.get_client().await?;
        let stmt = client
            .prepare(&format!("SELECT {ZONE_COLUMNS} FROM zones WHERE id = $1"))
            .await?;
        let rows = client.query(&stmt, &[&id]).await?;

        first_row_or_not_found(&rows, Self::map_row, ZoneError::NotFound {
            zone_id: id,
        })
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: Uuid) -> Result<bool, ZoneError> {
        let client = self.db.get_client().await?;
        let row = client
            .query_one("SELECT EXISTS(SELECT 1 FROM zones WHERE id = $1)", &[
                &id,
            ])
            .await?;
        Ok(row.get(0))
    }

    #[instrument(skip_all)]
    async fn all(&self) -> Result<Vec<Zone>, ZoneError> {
        let client = self.db.get_client().await?;
        let stmt = client
            .prepare(&format!(
                "SELECT {ZONE_COLUMNS} FROM zones ORDER BY name ASC"
            ))
            .await?;
        let rows = client.query(&stmt, &[]).await?;

        Ok(rows.iter().map(Self::map_row).collect())
    }

    #[instrument(skip_all, fields(zone.name = %req.name))]
    async fn create(&self, req: CreateZoneCommand) -> Result<Zone, ZoneError> {
        let client = self.db.get_client().await?;
        let stmt = client
            .prepare(&format!(
                "INSERT INTO zones (id, name, code, created_at)
                 VALUES ($1, $2, $3, $4)
                 ON CONFLICT (name) DO NOTHING
                 RETURNING {ZONE_COLUMNS}"
            ))
            .await?;
        let rows = client
            .query(&stmt, &[
                &Uuid::now_v7(),
                &req.name,
                &req.code,
                &Utc::now(),
            ])
            .await?;

        // ON CONFLICT DO NOTHING returns no row for a taken name
        rows.first()
            .map(Self::map_row)
            .ok_or_else(|| ZoneError::name_exists(&req.name))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<(), ZoneError> {
        let client = self.db.get_client().await?;
        let affected = client
            .execute("DELETE FROM zones WHERE id = $1", &[&id])
            .await?;

        if affected == 0 {
            return Err(ZoneError::NotFound { zone_id: id });
        }

        Ok(())
    }
}
