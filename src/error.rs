use rusqlite::ErrorCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse classification used by callers to decide how to react to a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Validation,
    StorageIo,
    Internal,
}

impl AppError {
    /// Classify a failed INSERT. Key collisions become `DuplicateKey`,
    /// a dangling `exercise_id` becomes `NotFound`.
    pub(crate) fn from_insert(err: rusqlite::Error, what: &str, id: &str) -> Self {
        if let rusqlite::Error::SqliteFailure(ref e, _) = err {
            if e.code == ErrorCode::ConstraintViolation {
                match e.extended_code {
                    rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                    | rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE => {
                        return AppError::DuplicateKey(format!("{} {} already exists", what, id));
                    }
                    rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY => {
                        return AppError::NotFound("Exercise not found".to_string());
                    }
                    _ => {}
                }
            }
        }
        AppError::Database(err)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::Validation(_) | AppError::DuplicateKey(_) => ErrorKind::Validation,
            AppError::Database(_) | AppError::Pool(_) | AppError::Serialization(_) => {
                ErrorKind::StorageIo
            }
            AppError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Message suitable for a blocking alert. Storage and internal details are
    /// logged here and replaced with a generic message.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Database error".to_string()
            }
            AppError::Pool(e) => {
                tracing::error!("Pool error: {:?}", e);
                "Database error".to_string()
            }
            AppError::Serialization(e) => {
                tracing::error!("Serialization error: {:?}", e);
                "Stored data could not be read".to_string()
            }
            AppError::NotFound(msg) => msg.clone(),
            AppError::DuplicateKey(msg) => msg.clone(),
            AppError::Validation(msg) => msg.clone(),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal error".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
