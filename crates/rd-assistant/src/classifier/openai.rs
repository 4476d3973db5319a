//! OpenAI-compatible chat-completions classifier.
//!
//! Sends the raw user text with a fixed instruction and expects a strict
//! JSON object `{"intent": ..., "fields": {...}}` back. Any failure is
//! logged and reported as "no result"; the resolver then falls back to the
//! rule tier.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use rd_protocol::Classification;
use serde::{Deserialize, Serialize};

use super::IntentClassifier;
use crate::config::ClassifierConfig;

const SYSTEM_PROMPT: &str = r#"You classify commands for a merchandise-returns desk. Users write in Chinese or mixed Chinese/English.

Respond with ONLY a JSON object (no markdown, no explanation):
{"intent": "<intent>", "fields": {"order_id": "", "product": "", "store_name": "", "date": "YYYY-MM-DD", "category": "", "return_reason": "", "cost": 0, "approved_flag": ""}}

Allowed intents:
- add_return: record a new return
- list_all: show every stored return
- export_report: export the returns to an Excel report
- unknown: anything else

Leave out or leave empty any field the user did not state. Do not invent values."#;

const TEMPERATURE: f32 = 0.2;
const MAX_TOKENS: u32 = 300;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Chat-completions response (only fields we need).
#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Classifier backed by a chat-completions endpoint.
pub struct OpenAiClassifier {
    client: Option<reqwest::Client>,
    config: ClassifierConfig,
}

impl OpenAiClassifier {
    /// Build the client. Availability is fixed here: a blank API key or a
    /// client that cannot be constructed leaves the classifier unavailable.
    pub fn new(config: ClassifierConfig) -> Self {
        if !config.has_credential() {
            tracing::info!("no classifier API key configured, using rule-based resolution only");
            return Self {
                client: None,
                config,
            };
        }

        let client = match reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
        {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::warn!(error = %e, "failed to build classifier HTTP client, classifier disabled");
                None
            }
        };

        if client.is_some() {
            tracing::info!(model = %config.model, base_url = %config.base_url, "intent classifier enabled");
        }
        Self { client, config }
    }

    async fn call_completion(&self, client: &reqwest::Client, text: &str) -> anyhow::Result<String> {
        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        let body = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: text,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .context("classifier request failed")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("classifier returned status {status}");
        }

        let chat: ChatResponse = response
            .json()
            .await
            .context("failed to parse classifier response body")?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .unwrap_or_default();

        let content = content.trim();
        if content.is_empty() {
            anyhow::bail!("classifier returned empty content");
        }
        Ok(content.to_string())
    }
}

#[async_trait]
impl IntentClassifier for OpenAiClassifier {
    fn is_available(&self) -> bool {
        self.client.is_some()
    }

    async fn analyze(&self, text: &str) -> Option<Classification> {
        let client = self.client.as_ref()?;

        let content = match self.call_completion(client, text).await {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "classifier call failed");
                return None;
            }
        };

        let json_str = strip_code_fence(&content);
        let value: serde_json::Value = match serde_json::from_str(json_str) {
            Ok(v) => v,
            Err(e) => {
                let preview: String = json_str.chars().take(200).collect();
                tracing::warn!(error = %e, content = %preview, "classifier returned invalid JSON");
                return None;
            }
        };

        let classification = Classification::from_json(&value);
        match &classification {
            Some(c) => tracing::debug!(intent = c.intent.as_str(), "classifier reply"),
            None => tracing::warn!("classifier reply missing intent or fields"),
        }
        classification
    }

    fn name(&self) -> &str {
        "openai"
    }
}

/// Strip one surrounding markdown code fence, optionally tagged `json`.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    let inner = inner.trim_start();
    let inner = match inner.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => &inner[4..],
        _ => inner,
    };
    inner.trim()
}
