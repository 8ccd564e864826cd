//! # rf-api Handlers
//!
//! This module coordinates the flow between HTTP requests and Core traits.

pub mod comments;
pub mod pages;
pub mod posts;
pub mod threads;
pub mod users;

use crate::error::WebError;
use askama::Template;
use axum::response::Html;
use rf_core::traits::{AuthProvider, CommentRepo, PostRepo, ThreadRepo, UserRepo};
use serde::Deserialize;
use std::sync::Arc;

/// State shared across all request handlers.
///
/// Built once at start-up; the repositories usually all point at the same pool.
#[derive(Clone)]
pub struct AppState {
    pub threads: Arc<dyn ThreadRepo>,
    pub posts: Arc<dyn PostRepo>,
    pub comments: Arc<dyn CommentRepo>,
    pub users: Arc<dyn UserRepo>,
    pub auth: Arc<dyn AuthProvider>,
}

impl AppState {
    /// Uses one adapter for every repository port.
    pub fn new<R, A>(repo: R, auth: A) -> Self
    where
        R: ThreadRepo + PostRepo + CommentRepo + UserRepo + Clone + 'static,
        A: AuthProvider + 'static,
    {
        Self {
            threads: Arc::new(repo.clone()),
            posts: Arc::new(repo.clone()),
            comments: Arc::new(repo.clone()),
            users: Arc::new(repo),
            auth: Arc::new(auth),
        }
    }
}

/// `?dir=up|down` on the vote routes.
#[derive(Debug, Default, Deserialize)]
pub struct VoteQuery {
    #[serde(default)]
    pub dir: String,
}

pub(crate) fn render(template: impl Template) -> Result<Html<String>, WebError> {
    Ok(Html(template.render()?))
}
