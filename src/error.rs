use thiserror::Error;

pub type Result<T> = std::result::Result<T, TableroError>;

#[derive(Debug, Error)]
pub enum TableroError {
    #[error("Board not found: {0}")]
    BoardNotFound(crate::domain::board::BoardId),

    #[error("Column not found: {0}")]
    ColumnNotFound(crate::domain::board::ColumnId),

    #[error("Task not found: {0}")]
    TaskNotFound(crate::domain::task::TaskId),

    #[error("Board integrity violation: {0}")]
    Integrity(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
