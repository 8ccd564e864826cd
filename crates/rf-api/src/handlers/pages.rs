use super::{render, AppState};
use crate::error::WebError;
use crate::session::{session_data, CurrentUser};
use axum::extract::State;
use axum::response::Html;
use axum::Json;
use rf_ui::HomeTemplate;
use serde_json::{json, Value};
use tower_sessions::Session;
use tracing::instrument;

/// Front page: every post, highest votes first.
#[instrument(skip_all)]
pub async fn home(
    State(state): State<AppState>,
    user: CurrentUser,
    session: Session,
) -> Result<Html<String>, WebError> {
    let posts = state.posts.list_posts_with_counts().await?;
    let view = session_data(&session, user).await?;

    render(HomeTemplate {
        session: &view,
        posts: &posts,
    })
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
