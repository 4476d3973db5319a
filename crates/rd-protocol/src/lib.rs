//! Shared types for Returns Desk.
//!
//! The return-record schema, the partially-filled `FieldSet` both
//! extraction tiers produce, classifier intents, and the exact reply
//! strings shown to users.

pub mod intent;
pub mod messages;
pub mod record;

pub use intent::{Classification, Intent};
pub use record::{COLUMNS, FieldSet, MissingFields, RequiredField, ReturnRecord};
