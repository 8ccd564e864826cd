use super::{render, AppState};
use crate::csrf::{CsrfProtectedForm, NoFields};
use crate::error::WebError;
use crate::forms::{ThreadForm, Validate};
use crate::session::{put_flash, put_form, redirect_back, session_data, CurrentUser};
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::{Html, Redirect};
use axum::Form;
use rf_core::models::Thread;
use rf_ui::{ThreadCreateTemplate, ThreadTemplate, ThreadsTemplate};
use tower_sessions::Session;
use tracing::{info, instrument};
use uuid::Uuid;

#[instrument(skip_all)]
pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
    session: Session,
) -> Result<Html<String>, WebError> {
    let threads = state.threads.list_threads().await?;
    let view = session_data(&session, user).await?;

    render(ThreadsTemplate {
        session: &view,
        threads: &threads,
    })
}

pub async fn new(user: CurrentUser, session: Session) -> Result<Html<String>, WebError> {
    let view = session_data(&session, user).await?;
    render(ThreadCreateTemplate { session: &view })
}

#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<CsrfProtectedForm<ThreadForm>>,
) -> Result<Redirect, WebError> {
    let form = form.verify(&session).await?;
    let checked = form.validate();
    if checked.has_errors() {
        put_form(&session, &checked).await?;
        return Ok(redirect_back(&headers, "/threads/new"));
    }

    let thread = state
        .threads
        .create_thread(Thread::new(form.title, form.description))
        .await?;
    info!(thread_id = %thread.id, "thread created");

    put_flash(&session, "Your new thread has been created.").await?;
    Ok(Redirect::to("/threads"))
}

#[instrument(skip(state, user, session))]
pub async fn show(
    State(state): State<AppState>,
    Path(thread_id): Path<Uuid>,
    user: CurrentUser,
    session: Session,
) -> Result<Html<String>, WebError> {
    let thread = state.threads.get_thread(thread_id).await?;
    let posts = state.posts.list_posts_by_thread(thread.id).await?;
    let view = session_data(&session, user).await?;

    render(ThreadTemplate {
        session: &view,
        thread: &thread,
        posts: &posts,
    })
}

#[instrument(skip(state, session, form))]
pub async fn delete(
    State(state): State<AppState>,
    Path(thread_id): Path<Uuid>,
    session: Session,
    Form(form): Form<CsrfProtectedForm<NoFields>>,
) -> Result<Redirect, WebError> {
    form.verify(&session).await?;

    state.threads.delete_thread(thread_id).await?;
    info!(%thread_id, "thread deleted");

    put_flash(&session, "The thread has been deleted.").await?;
    Ok(Redirect::to("/threads"))
}
