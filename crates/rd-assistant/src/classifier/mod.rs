//! Intent classification for free-form commands.
//!
//! A classifier proposes an [`Intent`](rd_protocol::Intent) and candidate
//! field values. Its output is advisory: the resolver validates and repairs
//! it with the rule-based extractor before anything is stored.

pub mod openai;

use async_trait::async_trait;
use rd_protocol::Classification;

/// Trait for engines that classify text into an intent with fields.
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    /// Whether this classifier can be consulted at all.
    fn is_available(&self) -> bool;

    /// Classify `text`. Returns `None` on any failure or refusal.
    async fn analyze(&self, text: &str) -> Option<Classification>;

    /// Name of this classifier (for logging).
    fn name(&self) -> &str;
}

pub use openai::OpenAiClassifier;

/// Classifier that is never available. Used offline and in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledClassifier;

#[async_trait]
impl IntentClassifier for DisabledClassifier {
    fn is_available(&self) -> bool {
        false
    }

    async fn analyze(&self, _text: &str) -> Option<Classification> {
        None
    }

    fn name(&self) -> &str {
        "disabled"
    }
}
