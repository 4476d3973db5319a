//! Resolver and configuration error types.

use thiserror::Error;

/// Irrecoverable collaborator failures. Everything recoverable becomes a
/// reply string instead.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("store error: {0}")]
    Store(#[from] rd_store::StoreError),

    #[error("report error: {0}")]
    Report(#[from] rd_report::ReportError),

    #[error("report task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// A structured add carried a record with empty required fields.
    #[error("{0}")]
    Invalid(rd_protocol::MissingFields),
}

pub type ResolveResult<T> = Result<T, ResolveError>;

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}
