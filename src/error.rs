//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use sqlx::error::ErrorKind;
use thiserror::Error;

/// Generic message returned for every rejected write. Reasons are logged, not returned.
pub const VALIDATION_ERRORS: &str = "validation errors";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
    #[error("unknown storage backend: {0} (expected postgres or memory)")]
    UnknownStorage(String),
}

/// Entity kinds that can be looked up by id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entity {
    Hero,
    Power,
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Entity::Hero => f.write_str("Hero"),
            Entity::Power => f.write_str("Power"),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0} not found")]
    NotFound(Entity),
    #[error("validation: {0}")]
    Validation(String),
    /// The datastore refused the write (foreign key, check, unique or not-null).
    #[error("constraint: {0}")]
    Constraint(String),
    #[error("database: {0}")]
    Db(sqlx::Error),
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            match db.kind() {
                ErrorKind::ForeignKeyViolation
                | ErrorKind::UniqueViolation
                | ErrorKind::CheckViolation
                | ErrorKind::NotNullViolation => {
                    return AppError::Constraint(db.message().to_string());
                }
                _ => {}
            }
        }
        AppError::Db(e)
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Serialize)]
pub struct ErrorsBody {
    pub errors: Vec<String>,
}

impl ErrorsBody {
    pub fn validation() -> Self {
        ErrorsBody {
            errors: vec![VALIDATION_ERRORS.to_string()],
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(ErrorBody {
                    error: self.to_string(),
                }),
            )
                .into_response(),
            AppError::Validation(reason) | AppError::Constraint(reason) => {
                tracing::warn!(%reason, "rejected write");
                (StatusCode::BAD_REQUEST, Json(ErrorsBody::validation())).into_response()
            }
            AppError::Db(e) => {
                tracing::error!(error = %e, "database failure");
                internal_error()
            }
            AppError::Config(e) => {
                tracing::error!(error = %e, "configuration failure");
                internal_error()
            }
        }
    }
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: "internal server error".to_string(),
        }),
    )
        .into_response()
}
