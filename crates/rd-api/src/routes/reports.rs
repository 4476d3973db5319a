//! Report generation endpoint.

use axum::Json;
use axum::extract::State;
use rd_assistant::{Command, CommandOutcome};
use rd_report::ReportOutcome;
use serde_json::{Value, json};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// POST /api/v1/reports: write the XLSX report to the configured path.
pub async fn generate_report(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let outcome = match state.resolver.handle(Command::GenerateReport).await? {
        CommandOutcome::Report(outcome) => outcome,
        other => return Err(ApiError::Internal(format!("unexpected outcome: {other:?}"))),
    };

    Ok(Json(json!({
        "path": state.resolver.report_path().display().to_string(),
        "rows": outcome.rows(),
        "written": matches!(outcome, ReportOutcome::Written { .. }),
    })))
}
