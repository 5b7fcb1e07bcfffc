use thiserror::Error;

use crate::app::models::TodoId;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Malformed stored data: {0}")]
    MalformedState(String),

    #[error("No todo id left above {0}")]
    IdsExhausted(TodoId),
}

pub type Result<T> = std::result::Result<T, StoreError>;
