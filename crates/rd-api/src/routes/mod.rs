//! API route definitions and router builder.

pub mod health;
pub mod messages;
pub mod reports;
pub mod returns;

use axum::Router;
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/messages", post(messages::post_message))
        .route(
            "/returns",
            get(returns::list_returns).post(returns::add_return),
        )
        .route("/reports", post(reports::generate_report));

    Router::new()
        .route("/health", get(health::health))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use rd_assistant::{DisabledClassifier, Resolver, ResolverConfig};
    use rd_report::XlsxReportGenerator;
    use rd_store::MemoryStore;
    use tower::ServiceExt;

    fn app(dir: &tempfile::TempDir) -> Router {
        let resolver = Resolver::new(
            Arc::new(MemoryStore::new()),
            Arc::new(XlsxReportGenerator),
            Arc::new(DisabledClassifier),
            ResolverConfig {
                report_path: dir.path().join("report.xlsx"),
            },
        );
        build_router(AppState::new(resolver))
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let dir = tempfile::tempdir().unwrap();
        let response = app(&dir)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn message_adds_record() {
        let dir = tempfile::tempdir().unwrap();
        let response = app(&dir)
            .oneshot(post_json(
                "/api/v1/messages",
                serde_json::json!({
                    "text": "order_id=R12345, product=滑鼠, store_name=台中店, date=2025-08-19"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["reply"], "已新增 目前資料總數 1 筆");
        assert!(json["id"].is_string());
        assert!(json["handled_at"].is_string());
    }

    #[tokio::test]
    async fn blank_message_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let response = app(&dir)
            .oneshot(post_json("/api/v1/messages", serde_json::json!({"text": "  "})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn add_then_list_returns() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(&dir);
        let record = serde_json::json!({
            "order_id": "R1",
            "product": "耳機",
            "store_name": "高雄店",
            "date": "2025-08-19",
            "cost": 450.0
        });

        let response = app
            .clone()
            .oneshot(post_json("/api/v1/returns", record.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["total"], 1);

        // Same order_id again replaces rather than appends.
        let response = app
            .clone()
            .oneshot(post_json("/api/v1/returns", record))
            .await
            .unwrap();
        assert_eq!(json_body(response).await["total"], 1);

        let response = app
            .oneshot(Request::get("/api/v1/returns").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        let records = json.as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["product"], "耳機");
        assert_eq!(records[0]["category"], "");
    }

    #[tokio::test]
    async fn add_incomplete_record_is_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let response = app(&dir)
            .oneshot(post_json(
                "/api/v1/returns",
                serde_json::json!({
                    "order_id": "R1",
                    "product": "",
                    "store_name": "高雄店",
                    "date": "2025-08-19"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["status"], 400);
        assert!(json["error"].as_str().unwrap().starts_with("缺少必要欄位：product。"));
    }

    #[tokio::test]
    async fn report_on_empty_store_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let response = app(&dir)
            .oneshot(Request::post("/api/v1/reports").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["rows"], 0);
        assert_eq!(json["written"], false);
        assert!(!dir.path().join("report.xlsx").exists());
    }

    #[tokio::test]
    async fn report_writes_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(&dir);
        app.clone()
            .oneshot(post_json(
                "/api/v1/returns",
                serde_json::json!({
                    "order_id": "R1",
                    "product": "耳機",
                    "store_name": "高雄店",
                    "date": "2025-08-19"
                }),
            ))
            .await
            .unwrap();

        let response = app
            .oneshot(Request::post("/api/v1/reports").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let json = json_body(response).await;
        assert_eq!(json["rows"], 1);
        assert_eq!(json["written"], true);
        assert!(dir.path().join("report.xlsx").exists());
    }
}
