use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("audio format error: {0}")]
    AudioFormat(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("invalid range: {0}")]
    InvalidRange(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid split point: {0}")]
    InvalidSplitPoint(String),

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
