//! User queries
//!
//! Inserts are generic over [`Executor`] so registration can run them inside
//! a transaction alongside the profile and session rows.

use chrono::Utc;
use sqlx::{Executor, Sqlite, SqlitePool};

use super::models::{NewUser, User};
use crate::{Error, Result};

const USER_COLUMNS: &str = "id, username, password_hash, email, created_at";

pub async fn get_user(db: &SqlitePool, id: i64) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(db)
        .await?;

    Ok(user)
}

pub async fn get_user_by_username(db: &SqlitePool, username: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE username = ?"
    ))
    .bind(username)
    .fetch_optional(db)
    .await?;

    Ok(user)
}

/// Insert a user
///
/// Duplicate usernames or emails surface as [`Error::Conflict`].
pub async fn create_user<'e, E>(db: E, new_user: &NewUser) -> Result<User>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (username, password_hash, email, created_at)
        VALUES (?, ?, ?, ?)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(&new_user.username)
    .bind(&new_user.password_hash)
    .bind(&new_user.email)
    .bind(Utc::now())
    .fetch_one(db)
    .await;

    match result {
        Ok(user) => Ok(user),
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            if db_err.message().contains("users.username") {
                Err(Error::Conflict(format!(
                    "Username '{}' is already taken",
                    new_user.username
                )))
            } else {
                Err(Error::Conflict(format!(
                    "Email '{}' is already registered",
                    new_user.email
                )))
            }
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn count_users(db: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(db)
        .await?;

    Ok(count)
}
