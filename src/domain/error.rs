use thiserror::Error;

/// Backend failures. "Not found" is never one of these; the port reports it
/// as `None` or `false`.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("malformed task document: {0}")]
    Document(#[from] serde_json::Error),
    #[error("in-memory task store lock poisoned")]
    Poisoned,
}

pub type StorageResult<T> = Result<T, StorageError>;
