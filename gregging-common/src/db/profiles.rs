//! Profile queries (1:1 with users)

use chrono::Utc;
use sqlx::{Executor, Sqlite, SqlitePool};

use super::models::{NewProfile, Profile, ProfileUpdate, DEFAULT_THEME};
use crate::Result;

const PROFILE_COLUMNS: &str = "id, user_id, display_name, bio, avatar_url, github_username, \
     linkedin_profile, portfolio_url, theme, updated_at";

pub async fn get_profile(db: &SqlitePool, user_id: i64) -> Result<Option<Profile>> {
    let profile = sqlx::query_as::<_, Profile>(&format!(
        "SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id = ?"
    ))
    .bind(user_id)
    .fetch_optional(db)
    .await?;

    Ok(profile)
}

pub async fn create_profile<'e, E>(db: E, profile: &NewProfile) -> Result<Profile>
where
    E: Executor<'e, Database = Sqlite>,
{
    let created = sqlx::query_as::<_, Profile>(&format!(
        r#"
        INSERT INTO profiles (user_id, display_name, bio, github_username, theme, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING {PROFILE_COLUMNS}
        "#
    ))
    .bind(profile.user_id)
    .bind(&profile.display_name)
    .bind(&profile.bio)
    .bind(&profile.github_username)
    .bind(DEFAULT_THEME)
    .bind(Utc::now())
    .fetch_one(db)
    .await?;

    Ok(created)
}

/// Apply a partial update, creating the profile first if the user has none
///
/// Callers validate the patch with [`ProfileUpdate::validate`] beforehand.
pub async fn update_profile(
    db: &SqlitePool,
    user_id: i64,
    patch: ProfileUpdate,
) -> Result<Profile> {
    let mut profile = match get_profile(db, user_id).await? {
        Some(profile) => profile,
        None => {
            create_profile(
                db,
                &NewProfile {
                    user_id,
                    ..Default::default()
                },
            )
            .await?
        }
    };

    patch.apply_to(&mut profile);

    let updated = sqlx::query_as::<_, Profile>(&format!(
        r#"
        UPDATE profiles
        SET display_name = ?, bio = ?, avatar_url = ?, github_username = ?,
            linkedin_profile = ?, portfolio_url = ?, theme = ?, updated_at = ?
        WHERE user_id = ?
        RETURNING {PROFILE_COLUMNS}
        "#
    ))
    .bind(&profile.display_name)
    .bind(&profile.bio)
    .bind(&profile.avatar_url)
    .bind(&profile.github_username)
    .bind(&profile.linkedin_profile)
    .bind(&profile.portfolio_url)
    .bind(&profile.theme)
    .bind(Utc::now())
    .bind(user_id)
    .fetch_one(db)
    .await?;

    Ok(updated)
}
