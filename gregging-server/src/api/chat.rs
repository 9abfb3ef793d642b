//! AI tutor chat endpoint

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::json::ApiJson;
use crate::chat::ChatError;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub message: String,
}

/// POST /api/chat
pub async fn chat(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    let message = req.message.trim();
    if message.is_empty() {
        return Err(ApiError::BadRequest("Message must not be empty".to_string()));
    }

    let limit = state.config.chat.max_message_chars;
    if message.chars().count() > limit {
        return Err(ApiError::BadRequest(format!(
            "Message exceeds {} characters",
            limit
        )));
    }

    let client = state
        .chat
        .as_ref()
        .ok_or_else(|| ApiError::Unavailable("AI chat is not configured".to_string()))?;

    let reply = client.complete(message).await.map_err(|e| match e {
        ChatError::NotConfigured => ApiError::Unavailable("AI chat is not configured".to_string()),
        other => {
            warn!("Chat completion failed: {}", other);
            ApiError::Upstream(other.to_string())
        }
    })?;

    Ok(Json(ChatResponse { message: reply }))
}
