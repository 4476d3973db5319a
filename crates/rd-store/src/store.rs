//! Record store abstraction.

use async_trait::async_trait;
use rd_protocol::ReturnRecord;

use crate::error::StoreResult;

/// Keyed return-record store.
///
/// `order_id` is the only identity. Backends must give upsert full-replace
/// semantics; there is no field-level merge.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert or fully replace the record with the same `order_id`.
    async fn upsert(&self, record: &ReturnRecord) -> StoreResult<()>;

    /// Every stored record, in whatever order the backend persists them.
    async fn full_scan(&self) -> StoreResult<Vec<ReturnRecord>>;

    /// Number of records currently stored.
    async fn count(&self) -> StoreResult<usize>;

    /// Backend name for logging.
    fn backend_name(&self) -> &str;

    /// Upsert each record in order. Returns how many were written.
    async fn bulk_upsert(&self, records: &[ReturnRecord]) -> StoreResult<usize> {
        for record in records {
            self.upsert(record).await?;
        }
        Ok(records.len())
    }
}
