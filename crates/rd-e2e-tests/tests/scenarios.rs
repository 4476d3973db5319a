//! E2E scenarios with the classifier unavailable (rule tier only).

mod helpers;

use helpers::TestHarness;
use rd_protocol::ReturnRecord;
use rd_report::xlsx::{RECORDS_SHEET, SUMMARY_SHEET};
use rd_store::RecordStore;

const CAPABILITIES: &str = "抱歉，我目前支援：新增退貨、列出所有資料、將資料匯出成 Excel。";

#[tokio::test]
async fn key_value_add_on_empty_store() {
    let h = TestHarness::offline().await;

    let reply = h
        .say("order_id=R12345, product=滑鼠, store_name=台中店, date=2025-08-19")
        .await;

    assert_eq!(reply, "已新增 目前資料總數 1 筆");
    assert_eq!(
        h.records().await,
        vec![ReturnRecord::new("R12345", "滑鼠", "台中店", "2025-08-19")]
    );
}

#[tokio::test]
async fn natural_language_add() {
    let h = TestHarness::offline().await;

    let reply = h
        .say("我要新增一筆來自台中店的滑鼠退貨 訂單編號是R99999 退貨日期是 2025-08-19")
        .await;

    assert_eq!(reply, "已新增 目前資料總數 1 筆");
    let records = h.records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].store_name, "台中店");
    assert_eq!(records[0].product, "滑鼠");
    assert_eq!(records[0].order_id, "R99999");
    assert_eq!(records[0].date, "2025-08-19");
}

#[tokio::test]
async fn partial_fields_name_exactly_the_missing_ones() {
    let h = TestHarness::offline().await;

    let reply = h.say("product=耳機").await;

    assert_eq!(
        reply,
        "缺少必要欄位：order_id, store_name, date。請提供例如：order_id=R12345, product=滑鼠, store_name=台中店, date=2025-08-19"
    );
    assert!(h.records().await.is_empty());
}

#[tokio::test]
async fn list_on_empty_store() {
    let h = TestHarness::offline().await;
    assert_eq!(h.say("列出所有資料").await, "目前沒有資料");
}

#[tokio::test]
async fn list_after_adds_renders_table() {
    let h = TestHarness::offline().await;
    h.say("order_id=R1, product=滑鼠, store_name=台中店, date=2025-08-19")
        .await;
    h.say("order_id=R2, product=耳機, store_name=高雄店, date=2025-08-20")
        .await;

    let table = h.say("列出所有資料").await;
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("order_id"));
    assert!(lines[0].ends_with("date"));
    assert!(table.contains("台中店"));
    assert!(table.contains("高雄店"));
}

#[tokio::test]
async fn export_on_non_empty_store() {
    let h = TestHarness::offline().await;
    h.say("order_id=R1, product=滑鼠, store_name=台中店, date=2025-08-19")
        .await;

    let reply = h.say("將資料匯出成 excel").await;

    assert_eq!(reply, format!("已匯出報表：{}", h.report_path().display()));
    let rows = helpers::read_sheet(&h.report_path(), RECORDS_SHEET);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1][0], "R1");
    assert_eq!(rows[1][6], "台中店");

    let summary = helpers::read_sheet(&h.report_path(), SUMMARY_SHEET);
    assert_eq!(summary[1], vec!["滑鼠".to_string(), "1".to_string()]);
}

#[tokio::test]
async fn unrelated_text_gets_capabilities() {
    let h = TestHarness::offline().await;
    assert_eq!(h.say("今天天氣如何").await, CAPABILITIES);
}

#[tokio::test]
async fn same_order_id_replaces_record() {
    let h = TestHarness::offline().await;
    h.say("order_id=R1, product=滑鼠, store_name=台中店, date=2025-08-19")
        .await;

    let reply = h
        .say("order_id=R1, product=鍵盤, store_name=台北店, date=2025-08-21")
        .await;

    assert_eq!(reply, "已新增 目前資料總數 1 筆");
    assert_eq!(
        h.records().await,
        vec![ReturnRecord::new("R1", "鍵盤", "台北店", "2025-08-21")]
    );
}

#[tokio::test]
async fn export_on_empty_store_writes_nothing() {
    let h = TestHarness::offline().await;

    let reply = h.say("匯出報表").await;

    assert_eq!(reply, format!("已匯出報表：{}", h.report_path().display()));
    assert!(!h.report_path().exists());
}

#[tokio::test]
async fn records_survive_a_restart() {
    let h = TestHarness::offline().await;
    h.say("order_id=R1, product=滑鼠, store_name=台中店, date=2025-08-19")
        .await;

    let store = rd_store::SqliteStore::connect(&h.db_url()).await.unwrap();
    assert_eq!(store.count().await.unwrap(), 1);
}
