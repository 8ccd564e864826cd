use super::posts::post_in_thread;
use super::{AppState, VoteQuery};
use crate::csrf::CsrfProtectedForm;
use crate::error::WebError;
use crate::forms::{CommentForm, Validate};
use crate::session::{put_flash, put_form, redirect_back};
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::Redirect;
use axum::Form;
use rf_core::models::{Comment, VoteDirection};
use tower_sessions::Session;
use tracing::{debug, info, instrument};
use uuid::Uuid;

#[instrument(skip(state, session, headers, form))]
pub async fn create(
    State(state): State<AppState>,
    Path((thread_id, post_id)): Path<(Uuid, Uuid)>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<CsrfProtectedForm<CommentForm>>,
) -> Result<Redirect, WebError> {
    let back = format!("/threads/{thread_id}/posts/{post_id}");
    let form = form.verify(&session).await?;
    let checked = form.validate();
    if checked.has_errors() {
        put_form(&session, &checked).await?;
        return Ok(redirect_back(&headers, &back));
    }

    let post = post_in_thread(&state, thread_id, post_id).await?;
    let comment = state
        .comments
        .create_comment(Comment::new(post.id, form.content))
        .await?;
    info!(comment_id = %comment.id, "comment created");

    put_flash(&session, "Your comment has been submitted.").await?;
    Ok(redirect_back(&headers, &back))
}

#[instrument(skip(state, headers))]
pub async fn vote(
    State(state): State<AppState>,
    Path(comment_id): Path<Uuid>,
    Query(query): Query<VoteQuery>,
    headers: HeaderMap,
) -> Result<Redirect, WebError> {
    let comment = state
        .comments
        .apply_comment_vote(comment_id, VoteDirection::parse(&query.dir))
        .await?;
    debug!(votes = comment.votes, "comment vote applied");

    Ok(redirect_back(&headers, "/"))
}
