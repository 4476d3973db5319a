//! User-facing reply strings. These are contract text; keep them byte-exact.

/// Example input appended to every missing-fields reply.
pub const EXAMPLE_INPUT: &str = "order_id=R12345, product=滑鼠, store_name=台中店, date=2025-08-19";

pub const EMPTY_LIST: &str = "目前沒有資料";

pub const CAPABILITIES: &str = "抱歉，我目前支援：新增退貨、列出所有資料、將資料匯出成 Excel。";

pub fn missing_fields(joined: &str) -> String {
    format!("缺少必要欄位：{joined}。請提供例如：{EXAMPLE_INPUT}")
}

pub fn added(total: usize) -> String {
    format!("已新增 目前資料總數 {total} 筆")
}

pub fn exported(output_path: &str) -> String {
    format!("已匯出報表：{output_path}")
}
