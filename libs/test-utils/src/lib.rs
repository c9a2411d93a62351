use std::{sync::Once, time::Duration};

use anyhow::{Context, Result};
use deadpool_postgres::Pool as PostgresPool;
use sql_connection::{PostgresDbConfig, SqlConnect, SqlMigrator, build_pool};
use testcontainers_modules::{
    postgres::Postgres,
    testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner},
};

static TRACING: Once = Once::new();

const READY_ATTEMPTS: u32 = 20;
const READY_BACKOFF: Duration = Duration::from_millis(500);

/// Installs a test-friendly subscriber once per process; honours
/// `RUST_LOG`.
pub fn init_test_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "warn".into()),
            )
            .with_test_writer()
            .try_init();
    });
}

/// PostgreSQL test container with the schema already migrated.
pub struct TestPostgresContainer {
    pub pool: PostgresPool,
    pub connection_string: String,
    // Keep the container alive for the lifetime of this struct
    _container: ContainerAsync<Postgres>,
}

impl TestPostgresContainer {
    pub async fn new() -> Result<Self> {
        init_test_tracing();

        let container = Postgres::default()
            .with_env_var("POSTGRES_DB", "testdb")
            .with_env_var("POSTGRES_USER", "testuser")
            .with_env_var("POSTGRES_PASSWORD", "testpass")
            .start()
            .await
            .context("Failed to start PostgreSQL container")?;

        let host = container.get_host().await?;
        let port = container.get_host_port_ipv4(5432).await?;
        let connection_string = format!(
            "postgresql://testuser:testpass@{host}:{port}/testdb"
        );

        let pool = Self::create_pool(&connection_string).await?;

        let instance = Self {
            pool,
            connection_string,
            _container: container,
        };

        SqlMigrator::new(instance.sql_connect())
            .run_all_migrations()
            .await
            .context("Failed to apply migrations")?;

        Ok(instance)
    }

    /// Builds the pool the same way the server does, then waits until the
    /// database accepts queries.
    async fn create_pool(connection_string: &str) -> Result<PostgresPool> {
        let config = PostgresDbConfig {
            uri: connection_string.to_string(),
            max_conn: Some(10),
            min_conn: None,
            logger: false,
        };
        let pool = build_pool(&config)
            .context("Failed to build PostgreSQL connection pool")?;

        for _ in 0..READY_ATTEMPTS {
            if let Ok(client) = pool.get().await {
                if client.simple_query("SELECT 1").await.is_ok() {
                    return Ok(pool);
                }
            }
            tokio::time::sleep(READY_BACKOFF).await;
        }

        anyhow::bail!("PostgreSQL not ready after {READY_ATTEMPTS} attempts")
    }

    pub fn sql_connect(&self) -> SqlConnect { SqlConnect::new(self.pool.clone()) }

    pub async fn execute_sql(&self, sql: &str) -> Result<()> {
        let client = self.pool.get().await?;
        client
            .batch_execute(sql)
            .await
            .context("Failed to execute SQL")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "requires a docker daemon"]
    async fn test_container_is_migrated() {
        let container = TestPostgresContainer::new().await.unwrap();

        let applied = SqlMigrator::new(container.sql_connect())
            .list_applied_migrations()
            .await
            .unwrap();
        assert_eq!(applied, vec!["001_create_zones", "002_create_colis"]);

        container.execute_sql("SELECT 1 FROM colis").await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires a docker daemon"]
    async fn test_containers_are_isolated() {
        let first = TestPostgresContainer::new().await.unwrap();
        let second = TestPostgresContainer::new().await.unwrap();

        assert_ne!(first.connection_string, second.connection_string);
    }
}
