//! Login session storage
//!
//! A session is an opaque random token mapped to a user until `expires_at`
//! (Unix epoch seconds). Expired rows are ignored on lookup and purged
//! periodically.

use chrono::{Duration, Utc};
use sqlx::{Executor, Sqlite, SqlitePool};

use super::models::{Session, User};
use crate::api::auth::generate_session_token;
use crate::Result;

/// Create a session for a user, valid for `ttl`
pub async fn create_session<'e, E>(db: E, user_id: i64, ttl: Duration) -> Result<Session>
where
    E: Executor<'e, Database = Sqlite>,
{
    let token = generate_session_token();
    let now = Utc::now();
    let expires_at = (now + ttl).timestamp();

    let session = sqlx::query_as::<_, Session>(
        r#"
        INSERT INTO sessions (token, user_id, created_at, expires_at)
        VALUES (?, ?, ?, ?)
        RETURNING token, user_id, created_at, expires_at
        "#,
    )
    .bind(&token)
    .bind(user_id)
    .bind(now)
    .bind(expires_at)
    .fetch_one(db)
    .await?;

    Ok(session)
}

/// Resolve a token to its user; `None` when unknown or expired
pub async fn get_session_user(db: &SqlitePool, token: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT u.id, u.username, u.password_hash, u.email, u.created_at
        FROM sessions s
        JOIN users u ON u.id = s.user_id
        WHERE s.token = ? AND s.expires_at > ?
        "#,
    )
    .bind(token)
    .bind(Utc::now().timestamp())
    .fetch_optional(db)
    .await?;

    Ok(user)
}

/// Delete a session. Unknown tokens are not an error.
pub async fn delete_session(db: &SqlitePool, token: &str) -> Result<()> {
    sqlx::query("DELETE FROM sessions WHERE token = ?")
        .bind(token)
        .execute(db)
        .await?;

    Ok(())
}

/// Remove all expired sessions, returning how many were deleted
pub async fn purge_expired_sessions(db: &SqlitePool) -> Result<u64> {
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
        .bind(Utc::now().timestamp())
        .execute(db)
        .await?;

    Ok(result.rows_affected())
}
