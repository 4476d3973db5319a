use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::record::{FieldSet, RequiredField};

/// What the user wants done with the return records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    AddReturn,
    ListAll,
    ExportReport,
    Unknown,
}

impl Intent {
    /// Parse a classifier label. Case and surrounding whitespace are ignored;
    /// unrecognized labels map to `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "add_return" => Intent::AddReturn,
            "list_all" | "list" | "show_all" => Intent::ListAll,
            "export_report" | "export" | "generate_report" => Intent::ExportReport,
            _ => Intent::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::AddReturn => "add_return",
            Intent::ListAll => "list_all",
            Intent::ExportReport => "export_report",
            Intent::Unknown => "unknown",
        }
    }
}

/// Structured classifier reply: an intent plus candidate field values.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub intent: Intent,
    pub fields: FieldSet,
}

impl Classification {
    /// Project a classifier JSON reply onto the fixed schema.
    ///
    /// The reply must be an object with a string `intent` and an object
    /// `fields`; anything else yields `None`. Individual field values are
    /// lenient: numbers and booleans are stringified, `null` and nested
    /// values are dropped.
    pub fn from_json(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let intent = Intent::from_label(obj.get("intent")?.as_str()?);
        let raw = obj.get("fields")?.as_object()?;

        let mut fields = FieldSet::new();
        for field in RequiredField::ALL {
            if let Some(v) = raw.get(field.as_str()).and_then(text_value) {
                fields.set(field, v);
            }
        }
        fields.category = raw.get("category").and_then(text_value);
        fields.return_reason = raw.get("return_reason").and_then(text_value);
        fields.approved_flag = raw.get("approved_flag").and_then(text_value);
        fields.cost = raw.get("cost").and_then(number_value);

        Some(Self { intent, fields })
    }
}

fn text_value(value: &Value) -> Option<String> {
    let s = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!s.is_empty()).then_some(s)
}

fn number_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
