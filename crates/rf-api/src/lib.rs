//! # rf-api
//!
//! The web routing and orchestration layer for Rusty Forum.
//!
//! Handlers talk to storage only through the `rf-core` ports held in
//! [`AppState`], render pages with `rf-ui` and keep per-visitor state in a
//! `tower-sessions` cookie session.

pub mod csrf;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod session;

pub use handlers::AppState;

use axum::routing::{get, post};
use axum::Router;
use std::time::Duration;
use tower_sessions::cookie::SameSite;
use tower_sessions::{MemoryStore, SessionManagerLayer};

const SESSION_COOKIE: &str = "rusty-forum-session";

/// Knobs the binary passes down from its settings.
#[derive(Debug, Clone)]
pub struct RouterOptions {
    pub request_timeout: Duration,
    /// Send the session cookie only over HTTPS.
    pub secure_cookies: bool,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            secure_cookies: false,
        }
    }
}

/// Builds the complete application router.
pub fn router(state: AppState, options: RouterOptions) -> Router {
    let sessions = SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE)
        .with_secure(options.secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_http_only(true);

    let routes = Router::new()
        .route("/", get(handlers::pages::home))
        .route("/health", get(handlers::pages::health))
        .route(
            "/register",
            get(handlers::users::register_form).post(handlers::users::register),
        )
        .route(
            "/login",
            get(handlers::users::login_form).post(handlers::users::login),
        )
        .route("/logout", get(handlers::users::logout))
        .route(
            "/threads",
            get(handlers::threads::list).post(handlers::threads::create),
        )
        .route("/threads/new", get(handlers::threads::new))
        .route("/threads/{thread_id}", get(handlers::threads::show))
        .route("/threads/{thread_id}/delete", post(handlers::threads::delete))
        .route("/threads/{thread_id}/posts", post(handlers::posts::create))
        .route("/threads/{thread_id}/posts/new", get(handlers::posts::new))
        .route(
            "/threads/{thread_id}/posts/{post_id}",
            get(handlers::posts::show),
        )
        .route(
            "/threads/{thread_id}/posts/{post_id}/vote",
            get(handlers::posts::vote),
        )
        .route(
            "/threads/{thread_id}/posts/{post_id}/comments",
            post(handlers::comments::create),
        )
        .route("/comments/{comment_id}/vote", get(handlers::comments::vote))
        .layer(sessions);

    let routes = middleware::security_headers(routes);
    middleware::observability(routes, options.request_timeout).with_state(state)
}
