use sdms_server::{AppState, build_app, config::ServerConfig};
use sql_connection::{PostgresDbConfig, SqlMigrator, connect_postgres_db};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    let db_config = PostgresDbConfig::from_env();

    info!("Initializing connection pool...");
    let db = connect_postgres_db(&db_config).await?;
    let (available, size) = db.get_pool_status();
    info!(available, size, "PostgreSQL connection pool initialized");

    if config.run_migrations {
        SqlMigrator::new(db.clone()).run_all_migrations().await?;
    }

    let app = build_app(AppState::postgres(db), &config);

    let addr = config.socket_addr()?;
    info!("SDMS server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
