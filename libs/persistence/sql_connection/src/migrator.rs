use tracing::{info, instrument};

use crate::SqlConnect;

/// Schema migrations in the order they must run.
pub const MIGRATIONS: &[(&str, &str)] = &[
    (
        "001_create_zones",
        include_str!("../../../../domains/zones/migrations/sql/001_create_zones.sql"),
    ),
    (
        "002_create_colis",
        include_str!("../../../../domains/colis/migrations/sql/002_create_colis.sql"),
    ),
];

/// Applies plain SQL migrations, recording each one in `_migrations`.
pub struct SqlMigrator {
    db: SqlConnect,
}

impl SqlMigrator {
    pub fn new(db: SqlConnect) -> Self { Self { db } }

    #[instrument(skip_all, name = "run-migrations")]
    pub async fn run_all_migrations(&self) -> anyhow::Result<()> {
        self.create_migration_table().await?;

        for (name, sql) in MIGRATIONS {
            if self.is_migration_applied(name).await? {
                info!(migration = name, "Migration already applied, skipping");
                continue;
            }

            let mut client = self.db.get_client().await?;
            let tx = client.transaction().await?;
            tx.batch_execute(sql).await.map_err(|e| {
                anyhow::anyhow!("Failed to run migration {name}: {e}")
            })?;
            tx.execute(
                "INSERT INTO _migrations (name, applied_at) VALUES ($1, \
                 NOW())",
                &[name],
            )
            .await?;
            tx.commit().await?;

            info!(migration = name, "Migration applied");
        }

        Ok(())
    }

    pub async fn list_applied_migrations(&self) -> anyhow::Result<Vec<String>> {
        self.create_migration_table().await?;

        let client = self.db.get_client().await?;
        let rows = client
            .query("SELECT name FROM _migrations ORDER BY id", &[])
            .await?;

        Ok(rows.iter().map(|row| row.get(0)).collect())
    }

    async fn create_migration_table(&self) -> anyhow::Result<()> {
        let client = self.db.get_client().await?;
        client
            .batch_execute(
                "CREATE TABLE IF NOT EXISTS _migrations (
                     id SERIAL PRIMARY KEY,
                     name VARCHAR(255) NOT NULL UNIQUE,
                     applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                 )",
            )
            .await?;
        Ok(())
    }

    async fn is_migration_applied(&self, name: &str) -> anyhow::Result<bool> {
        let client = self.db.get_client().await?;
        let row = client
            .query_one("SELECT COUNT(*) FROM _migrations WHERE name = $1", &[
                &name,
            ])
            .await?;
        let count: i64 = row.get(0);
        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_ordered_and_non_empty() {
        let names: Vec<&str> = MIGRATIONS.iter().map(|(n, _)| *n).collect();
        let mut sorted = names.clone();
        sorted.sort();

        assert_eq!(names, sorted);
        assert!(MIGRATIONS.iter().all(|(_, sql)| !sql.trim().is_empty()));
    }

    #[test]
    fn test_colis_table_references_zones() {
        let (_, sql) = MIGRATIONS[1];

        assert!(sql.contains("REFERENCES zones(id)"));
    }
}
