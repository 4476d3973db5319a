//! Report generator abstraction.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rd_protocol::ReturnRecord;

use crate::error::ReportResult;

/// What a `generate` call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// Artifact written with `rows` record rows.
    Written { path: PathBuf, rows: usize },
    /// No records; nothing was written.
    Empty,
}

impl ReportOutcome {
    pub fn rows(&self) -> usize {
        match self {
            ReportOutcome::Written { rows, .. } => *rows,
            ReportOutcome::Empty => 0,
        }
    }
}

/// Turns a full scan into a tabular artifact.
///
/// Implementations must not write anything when `records` is empty.
pub trait ReportGenerator: Send + Sync {
    fn generate(&self, records: &[ReturnRecord], output_path: &Path)
    -> ReportResult<ReportOutcome>;
}

/// Count of records per product, sorted by product name.
pub fn summarize_by_product(records: &[ReturnRecord]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.product.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(product, n)| (product.to_string(), n))
        .collect()
}
