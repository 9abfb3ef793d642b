//! Cookie sessions and account endpoints
//!
//! [`session_middleware`] resolves the `gregging.sid` cookie on every API
//! request and stores the user in request extensions as [`SessionUser`].
//! Handlers that require a login take [`AuthUser`], which rejects with 401
//! when no user was resolved.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use gregging_common::api::{
    hash_password, validate_email, validate_password, validate_username, verify_password,
};
use gregging_common::db::{profiles, sessions, users, NewProfile, NewUser, PublicUser, User};
use serde::Deserialize;
use tracing::{debug, info};

use super::json::ApiJson;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Session cookie name
pub const SESSION_COOKIE: &str = "gregging.sid";

/// User resolved from the session cookie
#[derive(Debug, Clone)]
pub struct SessionUser(pub User);

/// Extractor for handlers that require a logged-in user
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionUser>()
            .map(|session| AuthUser(session.0.clone()))
            .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))
    }
}

/// Resolve the session cookie, if any, to a user
///
/// Unknown or expired tokens leave the request anonymous.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let jar = CookieJar::from_headers(request.headers());
    if let Some(token) = session_token(&jar) {
        match sessions::get_session_user(&state.db, &token).await? {
            Some(user) => {
                request.extensions_mut().insert(SessionUser(user));
            }
            None => debug!("Ignoring unknown or expired session cookie"),
        }
    }

    Ok(next.run(request).await)
}

/// Value of the session cookie in a request
pub fn session_token(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE)
        .map(|cookie| cookie.value().trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Session cookie carrying `token` for `max_age`
fn session_cookie(token: String, max_age: chrono::Duration, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(cookie::time::Duration::seconds(max_age.num_seconds()))
        .secure(secure)
        .build()
}

/// Hash on the blocking pool, off the async workers
async fn hash_in_background(password: String) -> ApiResult<String> {
    let hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| ApiError::Internal(format!("Password hashing task failed: {}", e)))??;
    Ok(hash)
}

async fn verify_in_background(password: String, stored_hash: String) -> ApiResult<bool> {
    tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
        .await
        .map_err(|e| ApiError::Internal(format!("Password check task failed: {}", e)))
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /api/register
///
/// The user, profile and session rows are written in one transaction.
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> ApiResult<Response> {
    let username = req.username.trim().to_string();
    let email = req.email.trim().to_string();

    validate_username(&username)?;
    validate_email(&email)?;
    validate_password(&req.password)?;

    let password_hash = hash_in_background(req.password).await?;
    let ttl = state.session_ttl();

    let mut tx = state.db.begin().await.map_err(gregging_common::Error::from)?;

    let user = users::create_user(
        &mut *tx,
        &NewUser {
            username,
            email,
            password_hash,
        },
    )
    .await?;

    profiles::create_profile(
        &mut *tx,
        &NewProfile {
            user_id: user.id,
            ..Default::default()
        },
    )
    .await?;

    let session = sessions::create_session(&mut *tx, user.id, ttl).await?;

    tx.commit().await.map_err(gregging_common::Error::from)?;
    info!(user_id = user.id, username = %user.username, "Registered new user");

    let jar = jar.add(session_cookie(
        session.token,
        ttl,
        state.config.session.secure_cookie,
    ));

    Ok((StatusCode::CREATED, jar, Json(PublicUser::from(&user))).into_response())
}

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Response> {
    let invalid = || ApiError::Unauthorized("Invalid username or password".to_string());

    let user = users::get_user_by_username(&state.db, req.username.trim())
        .await?
        .ok_or_else(invalid)?;

    if !verify_in_background(req.password, user.password_hash.clone()).await? {
        debug!(username = %user.username, "Rejected login: wrong password");
        return Err(invalid());
    }

    let ttl = state.session_ttl();
    let session = sessions::create_session(&state.db, user.id, ttl).await?;
    info!(user_id = user.id, "User logged in");

    let jar = jar.add(session_cookie(
        session.token,
        ttl,
        state.config.session.secure_cookie,
    ));

    Ok((jar, Json(PublicUser::from(&user))).into_response())
}

/// POST /api/logout
///
/// Always succeeds; the cookie is cleared even without a live session.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> ApiResult<Response> {
    if let Some(token) = session_token(&jar) {
        sessions::delete_session(&state.db, &token).await?;
    }

    let jar = jar.add(session_cookie(
        String::new(),
        chrono::Duration::zero(),
        state.config.session.secure_cookie,
    ));

    Ok((StatusCode::NO_CONTENT, jar).into_response())
}

/// GET /api/user
pub async fn current_user(AuthUser(user): AuthUser) -> Json<PublicUser> {
    Json(PublicUser::from(&user))
}
