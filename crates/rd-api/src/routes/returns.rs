//! Structured return-record endpoints.

use axum::Json;
use axum::extract::State;
use rd_assistant::{Command, CommandOutcome};
use rd_protocol::ReturnRecord;
use serde_json::{Value, json};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// GET /api/v1/returns: every stored record.
pub async fn list_returns(State(state): State<AppState>) -> ApiResult<Json<Vec<ReturnRecord>>> {
    Ok(Json(state.resolver.records().await?))
}

/// POST /api/v1/returns: upsert one record by `order_id`.
pub async fn add_return(
    State(state): State<AppState>,
    Json(record): Json<ReturnRecord>,
) -> ApiResult<Json<Value>> {
    match state.resolver.handle(Command::AddReturn(record)).await? {
        CommandOutcome::Added { total } => Ok(Json(json!({ "total": total }))),
        other => Err(ApiError::Internal(format!("unexpected outcome: {other:?}"))),
    }
}
