//! Wires a [`Resolver`] from configuration.

use std::sync::Arc;

use rd_report::XlsxReportGenerator;
use rd_store::{RecordStore, SqliteStore};

use crate::classifier::OpenAiClassifier;
use crate::config::AssistantConfig;
use crate::error::ResolveResult;
use crate::resolver::{Resolver, ResolverConfig};

/// Open the store, build the classifier and report writer, and seed the
/// store from `seed_csv` when that file exists.
pub async fn build_resolver(config: &AssistantConfig) -> ResolveResult<Resolver> {
    let store = SqliteStore::connect(&config.database_url).await?;
    tracing::info!(database_url = %config.database_url, "record store opened");
    seed_store(&store, config).await;

    let classifier = OpenAiClassifier::new(config.classifier.clone());

    Ok(Resolver::new(
        Arc::new(store),
        Arc::new(XlsxReportGenerator),
        Arc::new(classifier),
        ResolverConfig {
            report_path: config.report_path.clone(),
        },
    ))
}

/// Seeding failures are logged, never fatal.
async fn seed_store(store: &dyn RecordStore, config: &AssistantConfig) {
    let Some(path) = config.seed_csv.as_deref() else {
        return;
    };
    if !path.exists() {
        tracing::debug!(path = %path.display(), "seed CSV not found, skipping");
        return;
    }
    match rd_store::ingest_csv_file(store, path).await {
        Ok(rows) => tracing::info!(rows, path = %path.display(), "store seeded from CSV"),
        Err(e) => tracing::warn!(error = %e, path = %path.display(), "seed CSV ingest failed"),
    }
}
