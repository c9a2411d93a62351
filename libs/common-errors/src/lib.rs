mod failures;
mod validation;

use std::fmt;

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
pub use failures::{OAuth2AuthenticationProcessingError, ResourceAlreadyExistsError};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
pub use validation::first_field_message;

/// Body returned for every translated failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    InvalidData,
    Validation,
    AlreadyExists,
    Authentication,
    Internal,
}

impl ErrorKind {
    /// Translation table from failure kind to status code and error label.
    pub fn translate(self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound => (StatusCode::NOT_FOUND, "Resource Not Found"),
            Self::InvalidData => (StatusCode::BAD_REQUEST, "Invalid Data"),
            Self::Validation => (StatusCode::BAD_REQUEST, "Validation Error"),
            Self::AlreadyExists => {
                (StatusCode::CONFLICT, "Resource Already Exists")
            }
            Self::Authentication => {
                (StatusCode::UNAUTHORIZED, "Authentication Failed")
            }
            Self::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        }
    }
}

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    InvalidData(String),
    Validation(String),
    AlreadyExists(String),
    Authentication(String),
    Internal(String),
}

const INTERNAL_MESSAGE: &str = "An unexpected error occurred";

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::AlreadyExists(message.into())
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::InvalidData(_) => ErrorKind::InvalidData,
            Self::Validation(_) => ErrorKind::Validation,
            Self::AlreadyExists(_) => ErrorKind::AlreadyExists,
            Self::Authentication(_) => ErrorKind::Authentication,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::NotFound(message)
            | Self::InvalidData(message)
            | Self::Validation(message)
            | Self::AlreadyExists(message)
            | Self::Authentication(message)
            | Self::Internal(message) => message,
        }
    }

    pub fn status_code(&self) -> StatusCode { self.kind().translate().0 }

    /// Internal details never leave the process; callers only see a
    /// generic message for them.
    pub fn to_body(&self) -> ErrorBody {
        let (_, label) = self.kind().translate();
        let message = match self {
            Self::Internal(_) => INTERNAL_MESSAGE,
            other => other.message(),
        };

        ErrorBody {
            error: label.to_string(),
            message: message.to_string(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            Self::Internal(detail) => {
                tracing::error!(error.detail = %detail, "request failed");
            }
            other => {
                tracing::debug!(
                    error.kind = ?other.kind(),
                    error.message = other.message(),
                    "request rejected"
                );
            }
        }

        (self.status_code(), Json(self.to_body())).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(first_field_message(&errors))
    }
}

impl From<ResourceAlreadyExistsError> for AppError {
    fn from(err: ResourceAlreadyExistsError) -> Self {
        Self::AlreadyExists(err.message().to_string())
    }
}

impl From<OAuth2AuthenticationProcessingError> for AppError {
    fn from(err: OAuth2AuthenticationProcessingError) -> Self {
        Self::Authentication(err.message().to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidData(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidData(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidData(rejection.body_text())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self { Self::Internal(format!("{err:#}")) }
}

pub type AppResult<T> = Result<T, AppError>;
