//! Return-record storage for Returns Desk.
//!
//! A single-table store keyed by `order_id` with upsert (full replace)
//! and full-scan reads, behind the `RecordStore` trait so the resolver can
//! run against SQLite in production and an in-memory backend in tests.
//! Also provides CSV bulk ingestion.

pub mod error;
pub mod ingest;
pub mod memory;
pub mod sqlite;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use ingest::{ingest_csv, ingest_csv_file, parse_csv};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use store::RecordStore;
