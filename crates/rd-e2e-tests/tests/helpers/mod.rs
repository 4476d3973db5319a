//! Shared test harness for E2E integration tests.
//!
//! Builds the resolver through the same bootstrap path the binaries use,
//! against a temp-dir SQLite file and report path, and exposes it both
//! directly and through the HTTP router.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use rd_api::{AppState, build_router};
use rd_assistant::bootstrap::build_resolver;
use rd_assistant::{AssistantConfig, ClassifierConfig, Resolver};
use rd_protocol::ReturnRecord;

/// Sample CSV covering full and sparse rows.
pub const SAMPLE_CSV: &str = "\
order_id,product,category,return_reason,cost,approved_flag,store_name,date
R10001,滑鼠,配件,故障,120,Yes,台中店,2025-08-18
R10002,耳機,配件,不喜歡,450.5,No,高雄店,2025-08-18
R10003,滑鼠,,,,,台北店,2025-08-19
";

pub struct TestHarness {
    /// Keeps the database and report directory alive for the test.
    pub dir: TempDir,
    pub state: AppState,
    pub router: Router,
}

impl TestHarness {
    /// Classifier unavailable: rule tier only.
    pub async fn offline() -> Self {
        Self::build(|_| {}).await
    }

    /// Classifier pointed at a mock chat-completions server.
    pub async fn with_classifier(base_url: &str) -> Self {
        let base_url = base_url.to_string();
        Self::build(move |config| {
            config.classifier = ClassifierConfig {
                api_key: "sk-e2e".into(),
                base_url,
                timeout_secs: 2,
                ..ClassifierConfig::default()
            };
        })
        .await
    }

    /// Seed the store from a CSV at start-up.
    pub async fn seeded(csv: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let seed = dir.path().join("seed.csv");
        std::fs::write(&seed, csv).unwrap();
        Self::build_in(dir, move |config| config.seed_csv = Some(seed)).await
    }

    async fn build(customize: impl FnOnce(&mut AssistantConfig)) -> Self {
        Self::build_in(tempfile::tempdir().unwrap(), customize).await
    }

    async fn build_in(dir: TempDir, customize: impl FnOnce(&mut AssistantConfig)) -> Self {
        let mut config = AssistantConfig {
            database_url: format!("sqlite://{}", dir.path().join("returns.db").display()),
            report_path: dir.path().join("report.xlsx"),
            seed_csv: None,
            ..AssistantConfig::default()
        };
        customize(&mut config);

        let resolver = build_resolver(&config).await.unwrap();
        let state = AppState::new(resolver);
        let router = build_router(state.clone());
        Self { dir, state, router }
    }

    pub fn resolver(&self) -> &Resolver {
        &self.state.resolver
    }

    pub fn report_path(&self) -> PathBuf {
        self.dir.path().join("report.xlsx")
    }

    pub fn db_url(&self) -> String {
        format!("sqlite://{}", self.dir.path().join("returns.db").display())
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Resolve a message directly and return the reply.
    pub async fn say(&self, text: &str) -> String {
        self.resolver().resolve(text).await.unwrap()
    }

    pub async fn records(&self) -> Vec<ReturnRecord> {
        self.resolver().records().await.unwrap()
    }

    /// Send a request through the router; returns (status, JSON body).
    pub async fn request(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        self.request(
            Request::post(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        self.request(Request::get(uri).body(Body::empty()).unwrap()).await
    }
}

/// Read every sheet row of `sheet` as display strings.
pub fn read_sheet(path: &Path, sheet: &str) -> Vec<Vec<String>> {
    use calamine::{Data, Reader, open_workbook_auto};

    let mut workbook = open_workbook_auto(path).unwrap();
    let range = workbook.worksheet_range(sheet).unwrap();
    range
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Data::String(s) => s.clone(),
                    Data::Float(f) => f.to_string(),
                    Data::Int(i) => i.to_string(),
                    other => format!("{other:?}"),
                })
                .collect()
        })
        .collect()
}

/// Chat-completions response body with `content` as the assistant message.
pub fn completion(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-e2e",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}
