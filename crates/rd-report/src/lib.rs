//! Reports over the return-record store: an XLSX workbook with the raw
//! records plus a per-product summary, and a plain-text table for chat
//! replies.

pub mod error;
pub mod generator;
pub mod table;
pub mod xlsx;

pub use error::{ReportError, ReportResult};
pub use generator::{ReportGenerator, ReportOutcome, summarize_by_product};
pub use table::render_table;
pub use xlsx::XlsxReportGenerator;
