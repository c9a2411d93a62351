use common_errors::AppError;
use sql_connection::{PgError, PoolError};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ColisError {
    #[error("Colis {colis_id} not found")]
    NotFound { colis_id: Uuid },
    #[error("Zone {zone_id} does not exist")]
    UnknownZone { zone_id: Uuid },
    #[error("Stored colis row is invalid: {0}")]
    CorruptRow(String),
    #[error("Database error: {0}")]
    Database(#[from] PgError),
    #[error("Database Pool error: {0}")]
    DatabasePool(#[from] PoolError),
}

impl From<ColisError> for AppError {
    fn from(err: ColisError) -> Self {
        match err {
            ColisError::NotFound { .. } => AppError::not_found(err.to_string()),
            ColisError::UnknownZone { .. } => {
                AppError::invalid_data(err.to_string())
            }
            ColisError::CorruptRow(_) => AppError::internal(err.to_string()),
            ColisError::Database(db_err) => {
                AppError::internal(format!("Database error: {db_err}"))
            }
            ColisError::DatabasePool(pool_err) => {
                AppError::internal(format!(
                    "Database connection error: {pool_err}"
                ))
            }
        }
    }
}
