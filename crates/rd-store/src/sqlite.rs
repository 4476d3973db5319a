//! SQLite-backed record store.

use std::str::FromStr;

use async_trait::async_trait;
use rd_protocol::ReturnRecord;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::error::StoreResult;
use crate::store::RecordStore;

/// Row as stored. Text columns are nullable in the schema, so rows written
/// by other tools may carry NULLs; those read back as empty / zero.
#[derive(Debug, sqlx::FromRow)]
struct ReturnRow {
    order_id: String,
    product: Option<String>,
    category: Option<String>,
    return_reason: Option<String>,
    cost: Option<f64>,
    approved_flag: Option<String>,
    store_name: Option<String>,
    date: Option<String>,
}

impl From<ReturnRow> for ReturnRecord {
    fn from(row: ReturnRow) -> Self {
        Self {
            order_id: row.order_id,
            product: row.product.unwrap_or_default(),
            category: row.category.unwrap_or_default(),
            return_reason: row.return_reason.unwrap_or_default(),
            cost: row.cost.unwrap_or(0.0),
            approved_flag: row.approved_flag.unwrap_or_default(),
            store_name: row.store_name.unwrap_or_default(),
            date: row.date.unwrap_or_default(),
        }
    }
}

/// Return-record store over a single `returns` table.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if missing) the database at `url`, e.g.
    /// `sqlite://returns.db`, and run migrations.
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        Self::with_pool(pool).await
    }

    /// Private in-memory database. A single connection is kept alive for
    /// the lifetime of the pool, since each SQLite memory connection is
    /// its own database.
    pub async fn in_memory() -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Self::with_pool(pool).await
    }

    /// Wrap an existing pool and run migrations.
    pub async fn with_pool(pool: SqlitePool) -> StoreResult<Self> {
        tracing::debug!("running store migrations");
        sqlx::raw_sql(include_str!("../migrations/001_returns.sql"))
            .execute(&pool)
            .await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn upsert(&self, record: &ReturnRecord) -> StoreResult<()> {
        sqlx::query(
            "INSERT OR REPLACE INTO returns
             (order_id, product, category, return_reason, cost, approved_flag, store_name, date)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&record.order_id)
        .bind(&record.product)
        .bind(&record.category)
        .bind(&record.return_reason)
        .bind(record.cost)
        .bind(&record.approved_flag)
        .bind(&record.store_name)
        .bind(&record.date)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn full_scan(&self) -> StoreResult<Vec<ReturnRecord>> {
        let rows = sqlx::query_as::<_, ReturnRow>(
            "SELECT order_id, product, category, return_reason, cost, approved_flag, store_name, date
             FROM returns",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(ReturnRecord::from).collect())
    }

    async fn count(&self) -> StoreResult<usize> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM returns")
            .fetch_one(&self.pool)
            .await?;
        Ok(usize::try_from(n).unwrap_or(0))
    }

    fn backend_name(&self) -> &str {
        "sqlite"
    }
}
