use super::{render, AppState};
use crate::csrf::CsrfProtectedForm;
use crate::error::WebError;
use crate::forms::{LoginForm, RegisterForm, Validate, INCORRECT_CREDENTIALS, USERNAME_TAKEN};
use crate::session::{
    log_in, log_out, put_flash, put_form, redirect_back, session_data, CurrentUser,
};
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{Html, Redirect};
use axum::Form;
use rf_core::accounts;
use rf_core::error::AppError;
use rf_ui::{LoginTemplate, RegisterTemplate};
use tower_sessions::Session;
use tracing::{info, instrument};
use uuid::Uuid;

pub async fn register_form(user: CurrentUser, session: Session) -> Result<Html<String>, WebError> {
    let view = session_data(&session, user).await?;
    render(RegisterTemplate { session: &view })
}

#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<CsrfProtectedForm<RegisterForm>>,
) -> Result<Redirect, WebError> {
    let form = form.verify(&session).await?;
    let mut checked = form.validate();
    if checked.has_errors() {
        put_form(&session, &checked).await?;
        return Ok(redirect_back(&headers, "/register"));
    }

    let username = form.username.trim();
    match accounts::register(
        state.users.as_ref(),
        state.auth.as_ref(),
        Uuid::new_v4(),
        username,
        &form.password,
    )
    .await
    {
        Ok(_) => {}
        Err(e) if e.is_conflict() => {
            checked.add_error("username", USERNAME_TAKEN);
            put_form(&session, &checked).await?;
            return Ok(redirect_back(&headers, "/register"));
        }
        Err(e) => return Err(e.into()),
    }

    put_flash(&session, "Your registration was successful. Please log in.").await?;
    Ok(Redirect::to("/"))
}

pub async fn login_form(user: CurrentUser, session: Session) -> Result<Html<String>, WebError> {
    let view = session_data(&session, user).await?;
    render(LoginTemplate { session: &view })
}

#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<CsrfProtectedForm<LoginForm>>,
) -> Result<Redirect, WebError> {
    let form = form.verify(&session).await?;
    let mut checked = form.validate();
    if checked.has_errors() {
        put_form(&session, &checked).await?;
        return Ok(redirect_back(&headers, "/login"));
    }

    let user = match accounts::login(
        state.users.as_ref(),
        state.auth.as_ref(),
        form.username.trim(),
        &form.password,
    )
    .await
    {
        Ok(user) => user,
        Err(AppError::InvalidCredentials) => {
            checked.add_error("credentials", INCORRECT_CREDENTIALS);
            put_form(&session, &checked).await?;
            return Ok(redirect_back(&headers, "/login"));
        }
        Err(e) => return Err(e.into()),
    };

    log_in(&session, user.id).await?;
    info!(user_id = %user.id, "user logged in");

    put_flash(&session, "You have been logged in successfully. Welcome back!").await?;
    Ok(Redirect::to("/"))
}

pub async fn logout(session: Session) -> Result<Redirect, WebError> {
    log_out(&session).await?;
    put_flash(&session, "You have been logged out successfully.").await?;
    Ok(Redirect::to("/"))
}
