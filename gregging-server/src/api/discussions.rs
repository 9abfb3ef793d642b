//! Discussion board: threads and their comments
//!
//! Reading is public; posting requires a session.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use gregging_common::db::{
    discussions, Comment, Discussion, DiscussionWithComments, NewComment, NewDiscussion,
};
use serde::Deserialize;
use tracing::info;

use super::auth::AuthUser;
use super::json::ApiJson;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateDiscussionRequest {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

fn require_text(field: &str, value: &str) -> ApiResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::BadRequest(format!("{} must not be empty", field)));
    }
    Ok(trimmed.to_string())
}

fn discussion_not_found(id: i64) -> ApiError {
    ApiError::NotFound(format!("Discussion {} not found", id))
}

/// GET /api/discussions
pub async fn list_discussions(State(state): State<AppState>) -> ApiResult<Json<Vec<Discussion>>> {
    Ok(Json(discussions::get_discussions(&state.db).await?))
}

/// GET /api/discussions/:id
pub async fn get_discussion(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<DiscussionWithComments>> {
    discussions::get_discussion_by_id(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| discussion_not_found(id))
}

/// POST /api/discussions
pub async fn create_discussion(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(req): ApiJson<CreateDiscussionRequest>,
) -> ApiResult<(StatusCode, Json<Discussion>)> {
    let title = require_text("Title", &req.title)?;
    let content = require_text("Content", &req.content)?;

    let discussion = discussions::create_discussion(
        &state.db,
        &NewDiscussion {
            user_id: user.id,
            title,
            content,
        },
    )
    .await?;

    info!(user_id = user.id, discussion_id = discussion.id, "Discussion created");
    Ok((StatusCode::CREATED, Json(discussion)))
}

/// GET /api/discussions/:id/comments
pub async fn list_comments(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vec<Comment>>> {
    if discussions::get_discussion(&state.db, id).await?.is_none() {
        return Err(discussion_not_found(id));
    }

    Ok(Json(discussions::get_comments(&state.db, id).await?))
}

/// POST /api/discussions/:id/comments
pub async fn create_comment(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
    ApiJson(req): ApiJson<CreateCommentRequest>,
) -> ApiResult<(StatusCode, Json<Comment>)> {
    if discussions::get_discussion(&state.db, id).await?.is_none() {
        return Err(discussion_not_found(id));
    }
    let content = require_text("Content", &req.content)?;

    let comment = discussions::create_comment(
        &state.db,
        &NewComment {
            discussion_id: id,
            user_id: user.id,
            content,
        },
    )
    .await?;

    info!(user_id = user.id, discussion_id = id, "Comment added");
    Ok((StatusCode::CREATED, Json(comment)))
}
