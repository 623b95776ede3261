use thiserror::Error;

/// Error type for the persistence layer. The analytics engine itself never
/// fails; malformed input degrades to zero/empty values instead.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Unknown item: {0}")]
    UnknownItem(String),
}
