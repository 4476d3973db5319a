//! Rule-based slot extractor: deterministic field extraction from free text.
//!
//! Two layers, each filling only fields still missing:
//! 1. explicit `key=value` / `key: value` tokens (highest precedence);
//! 2. per-field cue-phrase patterns for Chinese phrasing such as
//!    "來自台中店的滑鼠退貨 訂單編號是R99999 退貨日期是 2025-08-19".

use std::sync::LazyLock;

use regex::Regex;

use rd_protocol::{FieldSet, MissingFields, RequiredField, ReturnRecord};

/// `order_id=R1`, `Product: 滑鼠`. Values stop at whitespace or either comma.
static KEY_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?P<key>order_id|product|store_name|date)\s*[:=]\s*(?P<val>[^,，\s]+)")
        .unwrap()
});

/// "訂單編號是R99999"
static ORDER_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"訂單編號(?:是|為)?\s*(?P<val>[A-Za-z][0-9A-Za-z_-]+)").unwrap()
});

/// "退貨日期是 2025-08-19"
static DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"退貨日期(?:是|為)?\s*(?P<val>\d{4}-\d{2}-\d{2})").unwrap()
});

/// "來自台中店" / "在台中店"
static STORE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:來自|在)(?P<val>[^\s的，,。]+店)").unwrap());

/// "的滑鼠退貨"
static PRODUCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"的(?P<val>[^\s的，,。]+)退貨").unwrap());

fn cue_pattern(field: RequiredField) -> &'static Regex {
    match field {
        RequiredField::OrderId => &ORDER_ID,
        RequiredField::Product => &PRODUCT,
        RequiredField::StoreName => &STORE_NAME,
        RequiredField::Date => &DATE,
    }
}

/// Run both extraction layers and return whatever was found.
pub fn extract_fields(text: &str) -> FieldSet {
    let mut fields = FieldSet::new();

    // Layer 1: explicit key=value. A repeated key keeps its last value.
    for caps in KEY_VALUE.captures_iter(text) {
        if let Some(field) = RequiredField::from_key(&caps["key"]) {
            fields.set(field, &caps["val"]);
        }
    }

    // Layer 2: cue phrases, only for fields still missing.
    for field in RequiredField::ALL {
        if fields.has(field) {
            continue;
        }
        if let Some(caps) = cue_pattern(field).captures(text) {
            fields.set(field, &caps["val"]);
        }
    }

    fields
}

/// Extract a complete record, or report which required fields are missing.
///
/// Optional fields are defaulted (empty strings, zero cost).
pub fn extract(text: &str) -> Result<ReturnRecord, MissingFields> {
    let fields = extract_fields(text);
    tracing::debug!(
        found = 4 - fields.missing_required().len(),
        "rule-based slot extraction"
    );
    fields.into_record()
}

/// Whether the text carries at least one explicit `key=value` token for a
/// required field.
pub fn has_explicit_fields(text: &str) -> bool {
    KEY_VALUE.is_match(text)
}
