//! In-memory record store for tests and offline runs.

use async_trait::async_trait;
use rd_protocol::ReturnRecord;
use tokio::sync::RwLock;

use crate::error::StoreResult;
use crate::store::RecordStore;

/// Vec-backed store. Replaced records keep their original position.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Vec<ReturnRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-loaded with `records` (later duplicates win).
    pub fn with_records(records: impl IntoIterator<Item = ReturnRecord>) -> Self {
        let mut stored: Vec<ReturnRecord> = Vec::new();
        for record in records {
            upsert_into(&mut stored, record);
        }
        Self {
            records: RwLock::new(stored),
        }
    }
}

fn upsert_into(records: &mut Vec<ReturnRecord>, record: ReturnRecord) {
    match records.iter_mut().find(|r| r.order_id == record.order_id) {
        Some(existing) => *existing = record,
        None => records.push(record),
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn upsert(&self, record: &ReturnRecord) -> StoreResult<()> {
        let mut records = self.records.write().await;
        upsert_into(&mut records, record.clone());
        Ok(())
    }

    async fn full_scan(&self) -> StoreResult<Vec<ReturnRecord>> {
        Ok(self.records.read().await.clone())
    }

    async fn count(&self) -> StoreResult<usize> {
        Ok(self.records.read().await.len())
    }

    fn backend_name(&self) -> &str {
        "memory"
    }
}
