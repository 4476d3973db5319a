//! Free-form message endpoint.

use axum::Json;
use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Request body for a natural-language message.
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub id: Uuid,
    pub reply: String,
    pub handled_at: DateTime<Utc>,
}

/// POST /api/v1/messages: resolve one message into a reply.
pub async fn post_message(
    State(state): State<AppState>,
    Json(req): Json<MessageRequest>,
) -> ApiResult<Json<MessageResponse>> {
    if req.text.trim().is_empty() {
        return Err(ApiError::BadRequest("text must not be empty".into()));
    }

    let id = Uuid::now_v7();
    let reply = state.resolver.resolve(&req.text).await?;
    tracing::info!(message_id = %id, "message resolved");

    Ok(Json(MessageResponse {
        id,
        reply,
        handled_at: Utc::now(),
    }))
}
