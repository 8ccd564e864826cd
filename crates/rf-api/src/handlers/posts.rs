use super::{render, AppState, VoteQuery};
use crate::csrf::CsrfProtectedForm;
use crate::error::WebError;
use crate::forms::{PostForm, Validate};
use crate::session::{put_flash, put_form, redirect_back, session_data, CurrentUser};
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::{Html, Redirect};
use axum::Form;
use rf_core::error::AppError;
use rf_core::models::{Entity, Post, VoteDirection};
use rf_ui::{PostCreateTemplate, PostTemplate};
use tower_sessions::Session;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Loads a post, treating one that belongs to another thread as missing.
pub(crate) async fn post_in_thread(
    state: &AppState,
    thread_id: Uuid,
    post_id: Uuid,
) -> Result<Post, WebError> {
    let post = state.posts.get_post(post_id).await?;
    if post.thread_id != thread_id {
        return Err(AppError::not_found(Entity::Post, post_id).into());
    }
    Ok(post)
}

#[instrument(skip(state, user, session))]
pub async fn new(
    State(state): State<AppState>,
    Path(thread_id): Path<Uuid>,
    user: CurrentUser,
    session: Session,
) -> Result<Html<String>, WebError> {
    let thread = state.threads.get_thread(thread_id).await?;
    let view = session_data(&session, user).await?;

    render(PostCreateTemplate {
        session: &view,
        thread: &thread,
    })
}

#[instrument(skip(state, session, headers, form))]
pub async fn create(
    State(state): State<AppState>,
    Path(thread_id): Path<Uuid>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<CsrfProtectedForm<PostForm>>,
) -> Result<Redirect, WebError> {
    let form = form.verify(&session).await?;
    let checked = form.validate();
    if checked.has_errors() {
        put_form(&session, &checked).await?;
        return Ok(redirect_back(
            &headers,
            &format!("/threads/{thread_id}/posts/new"),
        ));
    }

    let thread = state.threads.get_thread(thread_id).await?;
    let post = state
        .posts
        .create_post(Post::new(thread.id, form.title, form.content))
        .await?;
    info!(post_id = %post.id, "post created");

    put_flash(&session, "Your new post has been created.").await?;
    Ok(Redirect::to(&format!(
        "/threads/{}/posts/{}",
        thread.id, post.id
    )))
}

#[instrument(skip(state, user, session))]
pub async fn show(
    State(state): State<AppState>,
    Path((thread_id, post_id)): Path<(Uuid, Uuid)>,
    user: CurrentUser,
    session: Session,
) -> Result<Html<String>, WebError> {
    let thread = state.threads.get_thread(thread_id).await?;
    let post = post_in_thread(&state, thread.id, post_id).await?;
    let comments = state.comments.list_comments_by_post(post.id).await?;
    let view = session_data(&session, user).await?;

    render(PostTemplate {
        session: &view,
        thread: &thread,
        post: &post,
        comments: &comments,
    })
}

#[instrument(skip(state, headers))]
pub async fn vote(
    State(state): State<AppState>,
    Path((thread_id, post_id)): Path<(Uuid, Uuid)>,
    Query(query): Query<VoteQuery>,
    headers: HeaderMap,
) -> Result<Redirect, WebError> {
    post_in_thread(&state, thread_id, post_id).await?;
    let post = state
        .posts
        .apply_post_vote(post_id, VoteDirection::parse(&query.dir))
        .await?;
    debug!(votes = post.votes, "post vote applied");

    Ok(redirect_back(
        &headers,
        &format!("/threads/{thread_id}/posts/{post_id}"),
    ))
}
