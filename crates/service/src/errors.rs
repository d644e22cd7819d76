use thiserror::Error;

/// Result type for storage and service operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// The store could not complete an operation.
///
/// "Not found" is deliberately absent: it is a normal outcome, reported as
/// `None` or `false` by the repository and service.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("address {0} vanished before it could be saved")]
    Stale(i64),
    #[error("stored data is invalid: {0}")]
    Serialization(String),
    #[error("storage io failed: {0}")]
    Io(String),
}

impl StorageError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            StorageError::Unavailable(_) => 2001,
            StorageError::Query(_) => 2002,
            StorageError::Stale(_) => 2003,
            StorageError::Serialization(_) => 2101,
            StorageError::Io(_) => 2102,
        }
    }
}

impl From<sea_orm::DbErr> for StorageError {
    fn from(e: sea_orm::DbErr) -> Self {
        match e {
            sea_orm::DbErr::Conn(_) | sea_orm::DbErr::ConnectionAcquire(_) => {
                StorageError::Unavailable(e.to_string())
            }
            other => StorageError::Query(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e.to_string())
    }
}
