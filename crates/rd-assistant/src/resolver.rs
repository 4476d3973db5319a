//! Resolver: turns one free-form message into a store or report action.
//!
//! Two tiers. The classifier (when available) proposes an intent and fields;
//! an `add_return` proposal is repaired from the rule-based extractor and
//! re-validated, never stored incomplete. An `unknown` intent, a missing
//! reply, or an unavailable classifier falls through to keyword routing.

use std::path::PathBuf;
use std::sync::Arc;

use rd_protocol::{FieldSet, Intent, ReturnRecord, messages};
use rd_report::{ReportGenerator, ReportOutcome, render_table};
use rd_store::RecordStore;

use crate::classifier::IntentClassifier;
use crate::error::{ResolveError, ResolveResult};
use crate::routing::{self, Action};
use crate::slots;

/// Resolver settings.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Output path handed to the report generator.
    pub report_path: PathBuf,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            report_path: PathBuf::from("report.xlsx"),
        }
    }
}

/// Structured commands that bypass language understanding.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddReturn(ReturnRecord),
    GenerateReport,
    IngestCsv(PathBuf),
}

/// Result of a structured [`Command`].
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Added { total: usize },
    Report(ReportOutcome),
    Ingested { rows: usize, total: usize },
}

pub struct Resolver {
    store: Arc<dyn RecordStore>,
    reports: Arc<dyn ReportGenerator>,
    classifier: Arc<dyn IntentClassifier>,
    config: ResolverConfig,
}

impl Resolver {
    pub fn new(
        store: Arc<dyn RecordStore>,
        reports: Arc<dyn ReportGenerator>,
        classifier: Arc<dyn IntentClassifier>,
        config: ResolverConfig,
    ) -> Self {
        Self {
            store,
            reports,
            classifier,
            config,
        }
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    pub fn report_path(&self) -> &std::path::Path {
        &self.config.report_path
    }

    /// Resolve one message into a reply.
    ///
    /// Recoverable conditions (missing fields, unrecognized input) are
    /// replies; only store and report failures are errors.
    pub async fn resolve(&self, text: &str) -> ResolveResult<String> {
        let text = text.trim();

        if self.classifier.is_available() {
            if let Some(classification) = self.classifier.analyze(text).await {
                let tier = self.classifier.name();
                match classification.intent {
                    Intent::AddReturn => {
                        tracing::debug!(tier, intent = "add_return", "resolved by classifier");
                        return self.add_proposed(text, classification.fields).await;
                    }
                    Intent::ListAll => {
                        tracing::debug!(tier, intent = "list_all", "resolved by classifier");
                        return self.list_all().await;
                    }
                    Intent::ExportReport => {
                        tracing::debug!(tier, intent = "export_report", "resolved by classifier");
                        return self.export_report().await;
                    }
                    Intent::Unknown => {
                        tracing::debug!(tier, "classifier intent unknown, falling back to rules");
                    }
                }
            }
        }

        let Some(rule) = routing::route(text) else {
            tracing::debug!(tier = "rules", rule = "none", "no keyword rule matched");
            return Ok(messages::CAPABILITIES.to_string());
        };

        tracing::debug!(tier = "rules", rule = rule.name, "resolved by keyword rule");
        match rule.action {
            Action::AddReturn => match slots::extract(text) {
                Ok(record) => self.add_confirmed(&record).await,
                Err(missing) => Ok(missing.to_string()),
            },
            Action::ListAll => self.list_all().await,
            Action::ExportReport => self.export_report().await,
        }
    }

    /// Run a structured command.
    pub async fn handle(&self, command: Command) -> ResolveResult<CommandOutcome> {
        match command {
            Command::AddReturn(record) => {
                let missing = record.missing_required();
                if !missing.is_empty() {
                    return Err(ResolveError::Invalid(rd_protocol::MissingFields::new(missing)));
                }
                let total = self.upsert_and_count(&record).await?;
                Ok(CommandOutcome::Added { total })
            }
            Command::GenerateReport => {
                let outcome = self.generate_report().await?;
                Ok(CommandOutcome::Report(outcome))
            }
            Command::IngestCsv(path) => {
                let rows = rd_store::ingest_csv_file(self.store.as_ref(), &path).await?;
                let total = self.store.count().await?;
                Ok(CommandOutcome::Ingested { rows, total })
            }
        }
    }

    /// Every stored record, in persisted order.
    pub async fn records(&self) -> ResolveResult<Vec<ReturnRecord>> {
        Ok(self.store.full_scan().await?)
    }

    async fn add_proposed(&self, text: &str, mut fields: FieldSet) -> ResolveResult<String> {
        if !fields.missing_required().is_empty() {
            match slots::extract(text) {
                Ok(parsed) => {
                    let filled = fields.fill_missing_from(&parsed);
                    tracing::debug!(filled = filled.len(), "repaired classifier fields from rules");
                }
                Err(missing) => return Ok(missing.to_string()),
            }
        }

        match fields.into_record() {
            Ok(record) => self.add_confirmed(&record).await,
            Err(missing) => Ok(missing.to_string()),
        }
    }

    async fn add_confirmed(&self, record: &ReturnRecord) -> ResolveResult<String> {
        let total = self.upsert_and_count(record).await?;
        Ok(messages::added(total))
    }

    async fn upsert_and_count(&self, record: &ReturnRecord) -> ResolveResult<usize> {
        self.store.upsert(record).await?;
        let total = self.store.count().await?;
        tracing::info!(order_id = %record.order_id, total, "return record stored");
        Ok(total)
    }

    async fn list_all(&self) -> ResolveResult<String> {
        let records = self.store.full_scan().await?;
        if records.is_empty() {
            return Ok(messages::EMPTY_LIST.to_string());
        }
        Ok(render_table(&records))
    }

    async fn export_report(&self) -> ResolveResult<String> {
        self.generate_report().await?;
        Ok(messages::exported(&self.config.report_path.display().to_string()))
    }

    /// The generator does synchronous file I/O, so it runs on the blocking pool.
    async fn generate_report(&self) -> ResolveResult<ReportOutcome> {
        let records = self.store.full_scan().await?;
        let reports = Arc::clone(&self.reports);
        let path = self.config.report_path.clone();
        let outcome = tokio::task::spawn_blocking(move || reports.generate(&records, &path)).await??;
        Ok(outcome)
    }
}
