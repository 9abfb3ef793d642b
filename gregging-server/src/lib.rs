//! gregging-server library - HTTP backend for Gregging Algorithms
//!
//! Serves the lesson catalog, quizzes and scores, user profiles, the
//! discussion board and the AI tutor chat. State lives in SQLite; browser
//! sessions are cookie-backed.

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use gregging_common::config::TomlConfig;
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub mod api;
pub mod chat;
pub mod error;

use chat::{ChatClient, ChatError};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Bootstrap configuration
    pub config: Arc<TomlConfig>,
    /// LLM client; `None` when no API key is configured
    pub chat: Option<Arc<ChatClient>>,
    /// Server start, for uptime reporting
    pub startup_time: Instant,
}

impl AppState {
    /// Create application state, building the chat client if configured
    pub fn new(db: SqlitePool, config: TomlConfig) -> Result<Self, ChatError> {
        let chat = match ChatClient::new(&config.chat) {
            Ok(client) => {
                info!("AI chat enabled (model {})", client.model());
                Some(Arc::new(client))
            }
            Err(ChatError::NotConfigured) => {
                info!("AI chat disabled: no API key configured");
                None
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            db,
            config: Arc::new(config),
            chat,
            startup_time: Instant::now(),
        })
    }

    /// Session lifetime
    pub fn session_ttl(&self) -> chrono::Duration {
        self.config.session.ttl()
    }
}

/// Build application router
///
/// Session resolution runs on every API route; handlers that need a user
/// take the [`api::AuthUser`] extractor. When `static_dir` exists, every
/// unrouted path is served from it with `index.html` as the SPA fallback;
/// otherwise unrouted paths get a JSON 404.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::{get, post};

    let mut app = Router::new()
        .route("/health", get(api::health))
        // Authentication
        .route("/api/register", post(api::register))
        .route("/api/login", post(api::login))
        .route("/api/logout", post(api::logout))
        .route("/api/user", get(api::current_user))
        // Progress
        .route("/api/user/scores", get(api::user_scores))
        .route("/api/user/progress", get(api::user_progress))
        // Quizzes
        .route("/api/tests/:slug/questions", get(api::get_questions))
        .route(
            "/api/tests/:slug/scores",
            get(api::get_latest_score).post(api::submit_score),
        )
        // Profile
        .route(
            "/api/profile",
            get(api::get_profile).patch(api::update_profile),
        )
        // Discussions
        .route(
            "/api/discussions",
            get(api::list_discussions).post(api::create_discussion),
        )
        .route("/api/discussions/:id", get(api::get_discussion))
        .route(
            "/api/discussions/:id/comments",
            get(api::list_comments).post(api::create_comment),
        )
        // Chat
        .route("/api/chat", post(api::chat))
        // Lessons
        .route("/api/topics", get(api::list_topics))
        .route("/api/topics/:slug", get(api::get_topic))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            api::session_middleware,
        ));

    match state.config.static_dir.as_ref() {
        Some(dir) if dir.is_dir() => {
            info!("Serving frontend from {}", dir.display());
            let index = ServeFile::new(dir.join("index.html"));
            app = app.fallback_service(ServeDir::new(dir).fallback(index));
        }
        Some(dir) => {
            warn!("Static directory {} not found; frontend not served", dir.display());
            app = app.fallback(api::unknown_endpoint);
        }
        None => {
            app = app.fallback(api::unknown_endpoint);
        }
    }

    let cors = cors_layer(&state.config.cors_origins);

    app.layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Credentialed CORS for the configured origins
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
