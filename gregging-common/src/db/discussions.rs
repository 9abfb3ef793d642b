//! Discussion and comment queries

use chrono::Utc;
use sqlx::SqlitePool;

use super::models::{Comment, Discussion, DiscussionWithComments, NewComment, NewDiscussion};
use crate::Result;

const DISCUSSION_COLUMNS: &str = "id, user_id, title, content, created_at, updated_at";
const COMMENT_COLUMNS: &str = "id, discussion_id, user_id, content, created_at";

/// All discussions, oldest first
pub async fn get_discussions(db: &SqlitePool) -> Result<Vec<Discussion>> {
    let discussions = sqlx::query_as::<_, Discussion>(&format!(
        "SELECT {DISCUSSION_COLUMNS} FROM discussions ORDER BY created_at, id"
    ))
    .fetch_all(db)
    .await?;

    Ok(discussions)
}

pub async fn get_discussion(db: &SqlitePool, id: i64) -> Result<Option<Discussion>> {
    let discussion = sqlx::query_as::<_, Discussion>(&format!(
        "SELECT {DISCUSSION_COLUMNS} FROM discussions WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(db)
    .await?;

    Ok(discussion)
}

/// A discussion with its comments in posting order
pub async fn get_discussion_by_id(
    db: &SqlitePool,
    id: i64,
) -> Result<Option<DiscussionWithComments>> {
    let Some(discussion) = get_discussion(db, id).await? else {
        return Ok(None);
    };

    let comments = get_comments(db, id).await?;

    Ok(Some(DiscussionWithComments {
        discussion,
        comments,
    }))
}

pub async fn create_discussion(db: &SqlitePool, discussion: &NewDiscussion) -> Result<Discussion> {
    let now = Utc::now();

    let created = sqlx::query_as::<_, Discussion>(&format!(
        r#"
        INSERT INTO discussions (user_id, title, content, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING {DISCUSSION_COLUMNS}
        "#
    ))
    .bind(discussion.user_id)
    .bind(&discussion.title)
    .bind(&discussion.content)
    .bind(now)
    .bind(now)
    .fetch_one(db)
    .await?;

    Ok(created)
}

pub async fn get_comments(db: &SqlitePool, discussion_id: i64) -> Result<Vec<Comment>> {
    let comments = sqlx::query_as::<_, Comment>(&format!(
        "SELECT {COMMENT_COLUMNS} FROM comments WHERE discussion_id = ? ORDER BY created_at, id"
    ))
    .bind(discussion_id)
    .fetch_all(db)
    .await?;

    Ok(comments)
}

pub async fn create_comment(db: &SqlitePool, comment: &NewComment) -> Result<Comment> {
    let created = sqlx::query_as::<_, Comment>(&format!(
        r#"
        INSERT INTO comments (discussion_id, user_id, content, created_at)
        VALUES (?, ?, ?, ?)
        RETURNING {COMMENT_COLUMNS}
        "#
    ))
    .bind(comment.discussion_id)
    .bind(comment.user_id)
    .bind(&comment.content)
    .bind(Utc::now())
    .fetch_one(db)
    .await?;

    Ok(created)
}
