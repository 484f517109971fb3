use thiserror::Error;

#[derive(Debug, Error)]
pub enum VigilError {
    /// Storage-boundary failure. A scan that hits this during save is not
    /// recorded; no partial state remains visible.
    #[error("Database error: {0}")]
    Database(String),

    /// A scan with this id already exists. Saving never overwrites.
    #[error("Duplicate scan id: {0}")]
    DuplicateScan(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
