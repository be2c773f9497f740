use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { field: String, message: String },

    #[error("{0}")]
    Conflict(String),

    #[error("Password hashes may not be viewed.")]
    PasswordHashHidden,

    #[error("Not Found")]
    NotFound,

    #[error("ORM error: {0}")]
    OrmError(#[from] sea_orm::DbErr),

    #[error("Internal Error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// A write rejected by a UNIQUE index becomes `Conflict(message)`; any
    /// other database error passes through unchanged.
    pub fn unique_or(err: DbErr, message: impl Into<String>) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::Conflict(message.into()),
            _ => AppError::OrmError(err),
        }
    }

    /// Field name for validation failures, `None` for every other kind.
    pub fn field(&self) -> Option<&str> {
        match self {
            AppError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
