//! Profile endpoints for the logged-in user

use axum::{extract::State, Json};
use gregging_common::db::{profiles, Profile, ProfileUpdate};
use tracing::info;

use super::auth::AuthUser;
use super::json::ApiJson;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// GET /api/profile
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<Profile>> {
    profiles::get_profile(&state.db, user.id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))
}

/// PATCH /api/profile
///
/// Absent fields are left alone; empty strings clear optional fields.
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(patch): ApiJson<ProfileUpdate>,
) -> ApiResult<Json<Profile>> {
    patch.validate()?;

    let profile = profiles::update_profile(&state.db, user.id, patch).await?;
    info!(user_id = user.id, "Profile updated");

    Ok(Json(profile))
}
