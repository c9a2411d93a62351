use common_errors::{AppError, ResourceAlreadyExistsError};
use sql_connection::{PgError, PoolError};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ZoneError {
    #[error("Zone {zone_id} not found")]
    NotFound { zone_id: Uuid },
    #[error(transparent)]
    NameExists(#[from] ResourceAlreadyExistsError),
    #[error("Database error: {0}")]
    Database(#[from] PgError),
    #[error("Database Pool error: {0}")]
    DatabasePool(#[from] PoolError),
}

impl ZoneError {
    pub fn name_exists(name: &str) -> Self {
        Self::NameExists(ResourceAlreadyExistsError::new(format!(
            "Zone with name '{name}' already exists"
        )))
    }
}

impl From<ZoneError> for AppError {
    fn from(err: ZoneError) -> Self {
        match err {
            ZoneError::NotFound { .. } => AppError::not_found(err.to_string()),
            ZoneError::NameExists(exists) => exists.into(),
            ZoneError::Database(db_err) => {
                AppError::internal(format!("Database error: {db_err}"))
            }
            ZoneError::DatabasePool(pool_err) => {
                AppError::internal(format!(
                    "Database connection error: {pool_err}"
                ))
            }
        }
    }
}
