use thiserror::Error;

pub type DashResult<T> = Result<T, DashError>;

#[derive(Debug, Error)]
pub enum DashError {
    #[error("ingestion failed: {0}")]
    Ingestion(String),

    #[error("data source {source_desc} failed: {reason}")]
    Source { source_desc: String, reason: String },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("stale load attempt: a newer load superseded this one")]
    StaleLoad,
}
