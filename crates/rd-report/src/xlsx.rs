//! XLSX report writer.

use std::path::Path;

use rd_protocol::{COLUMNS, ReturnRecord};
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::error::ReportResult;
use crate::generator::{ReportGenerator, ReportOutcome, summarize_by_product};

pub const RECORDS_SHEET: &str = "Returns";
pub const SUMMARY_SHEET: &str = "Summary";

/// Writes a two-sheet workbook: raw records and per-product return counts.
#[derive(Debug, Default, Clone, Copy)]
pub struct XlsxReportGenerator;

impl ReportGenerator for XlsxReportGenerator {
    fn generate(
        &self,
        records: &[ReturnRecord],
        output_path: &Path,
    ) -> ReportResult<ReportOutcome> {
        if records.is_empty() {
            tracing::info!("no data to generate report");
            return Ok(ReportOutcome::Empty);
        }

        let header = Format::new().set_bold();
        let mut workbook = Workbook::new();

        let sheet = workbook.add_worksheet();
        sheet.set_name(RECORDS_SHEET)?;
        write_records(sheet, records, &header)?;

        let sheet = workbook.add_worksheet();
        sheet.set_name(SUMMARY_SHEET)?;
        write_summary(sheet, records, &header)?;

        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        workbook.save(output_path)?;

        tracing::info!(
            path = %output_path.display(),
            rows = records.len(),
            "report saved"
        );
        Ok(ReportOutcome::Written {
            path: output_path.to_path_buf(),
            rows: records.len(),
        })
    }
}

fn write_records(
    sheet: &mut Worksheet,
    records: &[ReturnRecord],
    header: &Format,
) -> ReportResult<()> {
    for (col, name) in COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, header)?;
    }
    for (i, r) in records.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, &r.order_id)?;
        sheet.write_string(row, 1, &r.product)?;
        sheet.write_string(row, 2, &r.category)?;
        sheet.write_string(row, 3, &r.return_reason)?;
        sheet.write_number(row, 4, r.cost)?;
        sheet.write_string(row, 5, &r.approved_flag)?;
        sheet.write_string(row, 6, &r.store_name)?;
        sheet.write_string(row, 7, &r.date)?;
    }
    Ok(())
}

fn write_summary(
    sheet: &mut Worksheet,
    records: &[ReturnRecord],
    header: &Format,
) -> ReportResult<()> {
    sheet.write_string_with_format(0, 0, "product", header)?;
    sheet.write_string_with_format(0, 1, "return_count", header)?;
    for (i, (product, count)) in summarize_by_product(records).iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, product)?;
        sheet.write_number(row, 1, *count as f64)?;
    }
    Ok(())
}
