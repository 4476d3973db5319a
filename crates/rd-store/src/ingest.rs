//! CSV bulk ingestion.
//!
//! Expects a header row using the record column names. The four required
//! columns must be present and non-empty on every row; optional columns may
//! be missing entirely or left blank.

use std::io::Read;
use std::path::Path;

use rd_protocol::ReturnRecord;
use serde::Deserialize;

use crate::error::{StoreError, StoreResult};
use crate::store::RecordStore;

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    order_id: String,
    #[serde(default)]
    product: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    return_reason: String,
    #[serde(default)]
    cost: Option<f64>,
    #[serde(default)]
    approved_flag: String,
    #[serde(default)]
    store_name: String,
    #[serde(default)]
    date: String,
}

impl From<CsvRow> for ReturnRecord {
    fn from(row: CsvRow) -> Self {
        Self {
            order_id: row.order_id,
            product: row.product,
            category: row.category,
            return_reason: row.return_reason,
            cost: row.cost.unwrap_or(0.0),
            approved_flag: row.approved_flag,
            store_name: row.store_name,
            date: row.date,
        }
    }
}

/// Parse every row of a CSV source into records without touching a store.
///
/// Fails on the first malformed row; line numbers count the header as 1.
pub fn parse_csv<R: Read>(reader: R) -> StoreResult<Vec<ReturnRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (idx, row) in csv_reader.deserialize::<CsvRow>().enumerate() {
        let line = idx as u64 + 2;
        let record = ReturnRecord::from(row.map_err(|e| row_error(line, e))?);

        let missing = record.missing_required();
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(|f| f.as_str()).collect();
            return Err(StoreError::Ingest {
                line,
                message: format!("missing required columns: {}", names.join(", ")),
            });
        }
        records.push(record);
    }
    Ok(records)
}

/// Malformed rows become line-numbered [`StoreError::Ingest`]; reader
/// failures stay [`StoreError::Csv`].
fn row_error(line: u64, err: csv::Error) -> StoreError {
    match err.kind() {
        csv::ErrorKind::Deserialize { .. } | csv::ErrorKind::UnequalLengths { .. } => {
            StoreError::Ingest {
                line,
                message: err.to_string(),
            }
        }
        _ => StoreError::Csv(err),
    }
}

/// Parse a CSV source and upsert each row. All rows are validated before
/// the first write. Returns the number of rows ingested.
pub async fn ingest_csv<R: Read>(store: &dyn RecordStore, reader: R) -> StoreResult<usize> {
    let records = parse_csv(reader)?;
    let n = store.bulk_upsert(&records).await?;
    tracing::info!(rows = n, backend = store.backend_name(), "CSV ingest complete");
    Ok(n)
}

/// [`ingest_csv`] over a file path.
pub async fn ingest_csv_file(store: &dyn RecordStore, path: impl AsRef<Path>) -> StoreResult<usize> {
    let path = path.as_ref();
    tracing::info!(path = %path.display(), "ingesting CSV");
    let file = std::fs::File::open(path)?;
    ingest_csv(store, file).await
}
