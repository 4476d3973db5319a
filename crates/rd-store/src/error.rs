//! Store error types.

use thiserror::Error;

/// Errors raised by record stores and bulk ingestion.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ingest error on line {line}: {message}")]
    Ingest { line: u64, message: String },
}

/// Convenience alias for store results.
pub type StoreResult<T> = Result<T, StoreError>;
