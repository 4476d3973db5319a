//! Plain-text table rendering for chat replies.

use rd_protocol::{COLUMNS, ReturnRecord};
use unicode_width::UnicodeWidthStr;

const GAP: &str = "  ";

/// Render records as an aligned text table with a header row.
///
/// Columns are padded to their widest cell by display width, so CJK text
/// lines up in a terminal. Trailing padding is trimmed. An empty slice
/// renders the header alone.
pub fn render_table(records: &[ReturnRecord]) -> String {
    let rows: Vec<[String; 8]> = records.iter().map(ReturnRecord::cells).collect();

    let mut widths: Vec<usize> = COLUMNS.iter().map(|c| c.width()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.width());
        }
    }

    let mut out = Vec::with_capacity(rows.len() + 1);
    out.push(render_line(COLUMNS.iter().copied(), &widths));
    for row in &rows {
        out.push(render_line(row.iter().map(String::as_str), &widths));
    }
    out.join("\n")
}

fn render_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let mut line = String::new();
    for (i, (cell, width)) in cells.zip(widths).enumerate() {
        if i > 0 {
            line.push_str(GAP);
        }
        line.push_str(cell);
        line.extend(std::iter::repeat_n(' ', width.saturating_sub(cell.width())));
    }
    line.trim_end().to_string()
}
