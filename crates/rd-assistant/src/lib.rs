//! Returns Desk assistant: library crate.
//!
//! Resolves free-form return-record commands in two tiers: an optional
//! LLM intent classifier, backed by a deterministic rule-based slot
//! extractor and keyword router that work fully offline.

pub mod bootstrap;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod resolver;
pub mod routing;
pub mod slots;

pub use classifier::{DisabledClassifier, IntentClassifier, OpenAiClassifier};
pub use config::{AssistantConfig, ClassifierConfig};
pub use error::{ResolveError, ResolveResult};
pub use resolver::{Command, CommandOutcome, Resolver, ResolverConfig};
