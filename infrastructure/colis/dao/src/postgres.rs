use async_trait::async_trait;
use chrono::Utc;
use colis_commands::{CreateColisCommand, UpdateColisStatusCommand};
use colis_errors::ColisError;
use colis_models::{Colis, ColisStatus};
use colis_queries::ColisPredicate;
use dao_utils::pagination::{PaginationParams, create_param_refs};
use sql_connection::{PgError, SqlConnect};
use tokio_postgres::error::SqlState;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    ColisRepository,
    sql::{COLIS_COLUMNS, list_query, render_filter},
};

// Same columns as COLIS_COLUMNS, without the table alias
const RETURNING_COLUMNS: &str = "id, description, weight_kg, \
                                 destination_city, destination_address, \
                                 status, priority, zone_id, created_at, \
                                 updated_at";

#[derive(Clone)]
pub struct ColisDao {
    db: SqlConnect,
}

impl ColisDao {
    pub fn new(db: SqlConnect) -> Self { Self { db } }

    fn map_row(row: &tokio_postgres::Row) -> Result<Colis, ColisError> {
        let status: String = row.get(5);
        let priority: String = row.get(6);

        Ok(Colis {
            id: row.get(0),
            description: row.get(1),
            weight_kg: row.get(2),
            destination_city: row.get(3),
            destination_address: row.get(4),
            status: status
                .parse()
                .map_err(|e| ColisError::CorruptRow(format!("{e}")))?,
            priority: priority
                .parse()
                .map_err(|e| ColisError::CorruptRow(format!("{e}")))?,
            zone_id: row.get(7),
            created_at: row.get(8),
            updated_at: row.get(9),
        })
    }

    fn first_or_not_found(
        rows: &[tokio_postgres::Row], id: Uuid,
    ) -> Result<Colis, ColisError> {
        match rows.first() {
            Some(row) => Self::map_row(row),
            None => Err(ColisError::NotFound { colis_id: id }),
        }
    }
}

fn is_foreign_key_violation(err: &PgError) -> bool {
    err.code() == Some(&SqlState::FOREIGN_KEY_VIOLATION)
}

#[async_trait]
impl ColisRepository for ColisDao {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Colis, ColisError> {
        let client = self.db.get_client().await?;
        let stmt = client
            .prepare(&format!(
                "SELECT {COLIS_COLUMNS} FROM colis c WHERE c.id = $1"
            ))
            .await?;
        let rows = client.query(&stmt, &[&id]).await?;

        Self::first_or_not_found(&rows, id)
    }

    #[instrument(skip_all, fields(clauses = predicate.clauses().len()))]
    async fn find_matching(
        &self, predicate: &ColisPredicate, pagination: PaginationParams,
    ) -> Result<Vec<Colis>, ColisError> {
        let filter = render_filter(predicate);
        let (sql, page_params) = list_query(&filter, &pagination);

        let mut params = filter.where_clause.param_refs();
        params.extend(create_param_refs(&page_params));

        let client = self.db.get_client().await?;
        let stmt = client.prepare(&sql).await?;
        let rows = client.query(&stmt, &params).await?;

        rows.iter().map(Self::map_row).collect()
    }

    #[instrument(skip_all)]
    async fn create(
        &self, req: CreateColisCommand,
    ) -> Result<Colis, ColisError> {
        let client = self.db.get_client().await?;
        let now = Utc::now();
        let stmt = client
            .prepare(&format!(
                "INSERT INTO colis (id, description, weight_kg, \
                 destination_city, destination_address, status, priority, \
                 zone_id, created_at, updated_at)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
                 RETURNING {RETURNING_COLUMNS}"
            ))
            .await?;

        let result = client
            .query(&stmt, &[
                &Uuid::now_v7(),
                &req.description,
                &req.weight_kg,
                &req.destination_city,
                &req.destination_address,
                &ColisStatus::Created.as_str(),
                &req.priority.as_str(),
                &req.zone_id,
                &now,
            ])
            .await;

        let rows = match (result, req.zone_id) {
            (Ok(rows), _) => rows,
            (Err(e), Some(zone_id)) if is_foreign_key_violation(&e) => {
                return Err(ColisError::UnknownZone { zone_id });
            }
            (Err(e), _) => return Err(e.into()),
        };

        match rows.first() {
            Some(row) => Self::map_row(row),
            None => Err(ColisError::CorruptRow("insert returned no row".into())),
        }
    }

    #[instrument(skip_all, fields(colis.id = %req.colis_id))]
    async fn update_status(
        &self, req: UpdateColisStatusCommand,
    ) -> Result<Colis, ColisError> {
        let client = self.db.get_client().await?;
        let stmt = client
            .prepare(&format!(
                "UPDATE colis SET status = $1, updated_at = $2
                 WHERE id = $3
                 RETURNING {RETURNING_COLUMNS}"
            ))
            .await?;
        let rows = client
            .query(&stmt, &[&req.status.as_str(), &Utc::now(), &req.colis_id])
            .await?;

        Self::first_or_not_found(&rows, req.colis_id)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<(), ColisError> {
        let client = self.db.get_client().await?;
        let affected = client
            .execute("DELETE FROM colis WHERE id = $1", &[&id])
            .await?;

        if affected == 0 {
            return Err(ColisError::NotFound { colis_id: id });
        }

        Ok(())
    }
}
