use std::fmt;

use serde::{Deserialize, Serialize};

use crate::messages;

/// One merchandise-return transaction, keyed by `order_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnRecord {
    /// Unique key. Upserting an existing `order_id` replaces the whole record.
    pub order_id: String,
    pub product: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub return_reason: String,
    #[serde(default)]
    pub cost: f64,
    /// Free-form approval marker ("Yes"/"No"), not a boolean.
    #[serde(default)]
    pub approved_flag: String,
    pub store_name: String,
    /// `YYYY-MM-DD`, shape only.
    pub date: String,
}

/// Column names in storage / tabulation order.
pub const COLUMNS: [&str; 8] = [
    "order_id",
    "product",
    "category",
    "return_reason",
    "cost",
    "approved_flag",
    "store_name",
    "date",
];

impl ReturnRecord {
    /// Build a record from the four required fields, defaulting the rest.
    pub fn new(
        order_id: impl Into<String>,
        product: impl Into<String>,
        store_name: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            product: product.into(),
            category: String::new(),
            return_reason: String::new(),
            cost: 0.0,
            approved_flag: String::new(),
            store_name: store_name.into(),
            date: date.into(),
        }
    }

    /// Required fields that are empty, in fixed order.
    pub fn missing_required(&self) -> Vec<RequiredField> {
        RequiredField::ALL
            .into_iter()
            .filter(|f| self.required(*f).trim().is_empty())
            .collect()
    }

    pub fn required(&self, field: RequiredField) -> &str {
        match field {
            RequiredField::OrderId => &self.order_id,
            RequiredField::Product => &self.product,
            RequiredField::StoreName => &self.store_name,
            RequiredField::Date => &self.date,
        }
    }

    /// Cell values in [`COLUMNS`] order.
    pub fn cells(&self) -> [String; 8] {
        [
            self.order_id.clone(),
            self.product.clone(),
            self.category.clone(),
            self.return_reason.clone(),
            format!("{:.2}", self.cost),
            self.approved_flag.clone(),
            self.store_name.clone(),
            self.date.clone(),
        ]
    }
}

/// The four fields a record cannot be stored without.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    OrderId,
    Product,
    StoreName,
    Date,
}

impl RequiredField {
    /// Fixed validation / reporting order.
    pub const ALL: [RequiredField; 4] = [
        RequiredField::OrderId,
        RequiredField::Product,
        RequiredField::StoreName,
        RequiredField::Date,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequiredField::OrderId => "order_id",
            RequiredField::Product => "product",
            RequiredField::StoreName => "store_name",
            RequiredField::Date => "date",
        }
    }

    /// Case-insensitive lookup by field name.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|f| f.as_str() == key)
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A partially-filled extraction over the eight-field schema.
///
/// Both extraction sources (classifier and rule-based extractor) produce
/// one of these. Empty strings are normalized to `None` on write so
/// "absent" and "empty" mean the same thing everywhere.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSet {
    pub order_id: Option<String>,
    pub product: Option<String>,
    pub store_name: Option<String>,
    pub date: Option<String>,
    pub category: Option<String>,
    pub return_reason: Option<String>,
    pub cost: Option<f64>,
    pub approved_flag: Option<String>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: RequiredField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    fn slot(&self, field: RequiredField) -> &Option<String> {
        match field {
            RequiredField::OrderId => &self.order_id,
            RequiredField::Product => &self.product,
            RequiredField::StoreName => &self.store_name,
            RequiredField::Date => &self.date,
        }
    }

    fn slot_mut(&mut self, field: RequiredField) -> &mut Option<String> {
        match field {
            RequiredField::OrderId => &mut self.order_id,
            RequiredField::Product => &mut self.product,
            RequiredField::StoreName => &mut self.store_name,
            RequiredField::Date => &mut self.date,
        }
    }

    pub fn has(&self, field: RequiredField) -> bool {
        self.get(field).is_some_and(|v| !v.trim().is_empty())
    }

    /// Set a required field, trimming the value. Blank values clear the slot.
    pub fn set(&mut self, field: RequiredField, value: impl AsRef<str>) {
        *self.slot_mut(field) = non_blank(value.as_ref());
    }

    /// Set a required field only if it is still absent. Returns whether it was set.
    pub fn set_if_absent(&mut self, field: RequiredField, value: impl AsRef<str>) -> bool {
        if self.has(field) {
            return false;
        }
        self.set(field, value);
        self.has(field)
    }

    /// Required fields still absent or empty, in fixed order.
    pub fn missing_required(&self) -> Vec<RequiredField> {
        RequiredField::ALL
            .into_iter()
            .filter(|f| !self.has(*f))
            .collect()
    }

    /// Fill each required field that is absent here from `record`.
    ///
    /// Fields already present are never overwritten. Returns the fields
    /// that were filled.
    pub fn fill_missing_from(&mut self, record: &ReturnRecord) -> Vec<RequiredField> {
        RequiredField::ALL
            .into_iter()
            .filter(|f| self.set_if_absent(*f, record.required(*f)))
            .collect()
    }

    /// Validate required fields and build a record with optional defaults.
    pub fn into_record(self) -> Result<ReturnRecord, MissingFields> {
        let missing = self.missing_required();
        if !missing.is_empty() {
            return Err(MissingFields::new(missing));
        }
        Ok(ReturnRecord {
            order_id: self.order_id.unwrap_or_default(),
            product: self.product.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            return_reason: self.return_reason.unwrap_or_default(),
            cost: self.cost.unwrap_or(0.0),
            approved_flag: self.approved_flag.unwrap_or_default(),
            store_name: self.store_name.unwrap_or_default(),
            date: self.date.unwrap_or_default(),
        })
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Validation failure: required fields that could not be resolved.
///
/// `Display` renders the user-facing corrective message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFields {
    fields: Vec<RequiredField>,
}

impl MissingFields {
    pub fn new(mut fields: Vec<RequiredField>) -> Self {
        fields.sort_by_key(|f| RequiredField::ALL.iter().position(|x| x == f));
        fields.dedup();
        Self { fields }
    }

    pub fn fields(&self) -> &[RequiredField] {
        &self.fields
    }

    /// Missing names joined with `, `.
    pub fn joined(&self) -> String {
        self.fields
            .iter()
            .map(RequiredField::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for MissingFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&messages::missing_fields(&self.joined()))
    }
}

impl std::error::Error for MissingFields {}
