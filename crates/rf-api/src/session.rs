//! Session-carried state: the logged-in user id, one-shot flash messages
//! and one-shot form state for re-displaying rejected submissions.

use crate::csrf;
use crate::error::WebError;
use crate::handlers::AppState;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, HeaderMap, Uri};
use axum::response::{IntoResponse, Redirect, Response};
use rf_core::models::User;
use rf_ui::{FormState, SessionData};
use tower_sessions::Session;
use tracing::debug;
use uuid::Uuid;

const USER_ID_KEY: &str = "user_id";
const FLASH_KEY: &str = "flash";
const FORM_KEY: &str = "form";

/// The logged-in user, if any, resolved from the session for this request.
///
/// Handlers that need identity take this as an explicit parameter.
#[derive(Debug, Clone, Default)]
pub struct CurrentUser(pub Option<User>);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        let Some(user_id) = session
            .get::<Uuid>(USER_ID_KEY)
            .await
            .map_err(|e| WebError::from(e).into_response())?
        else {
            return Ok(Self(None));
        };

        match state.users.get_user(user_id).await {
            Ok(user) => Ok(Self(Some(user))),
            Err(e) if e.is_not_found() => {
                debug!(%user_id, "session refers to a user that no longer exists");
                Ok(Self(None))
            }
            Err(e) => Err(WebError::from(e).into_response()),
        }
    }
}

pub async fn put_flash(session: &Session, message: &str) -> Result<(), WebError> {
    session.insert(FLASH_KEY, message).await?;
    Ok(())
}

pub async fn put_form(session: &Session, form: &FormState) -> Result<(), WebError> {
    session.insert(FORM_KEY, form).await?;
    Ok(())
}

/// Marks the session as belonging to `user_id`. The session id is rotated first.
pub async fn log_in(session: &Session, user_id: Uuid) -> Result<(), WebError> {
    session.cycle_id().await?;
    session.insert(USER_ID_KEY, user_id).await?;
    Ok(())
}

pub async fn log_out(session: &Session) -> Result<(), WebError> {
    session.remove::<Uuid>(USER_ID_KEY).await?;
    Ok(())
}

/// Collects what the page layout needs, consuming the one-shot flash and form state.
pub async fn session_data(session: &Session, user: CurrentUser) -> Result<SessionData, WebError> {
    let flash = session.remove::<String>(FLASH_KEY).await?;
    let form = session
        .remove::<FormState>(FORM_KEY)
        .await?
        .unwrap_or_default();
    let csrf_token = csrf::token(session).await?;

    Ok(SessionData {
        user: user.0,
        flash,
        form,
        csrf_token,
    })
}

/// Redirects to the page the request came from, or to `fallback`.
///
/// Only the path and query of the `Referer` are used, so the target always
/// stays on this site.
pub fn redirect_back(headers: &HeaderMap, fallback: &str) -> Redirect {
    let target = headers
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<Uri>().ok())
        .and_then(|uri| uri.path_and_query().map(|pq| pq.as_str().to_string()))
        .filter(|path| path.starts_with('/') && !path.starts_with("//"));

    Redirect::to(target.as_deref().unwrap_or(fallback))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn location(redirect: Redirect) -> String {
        let response = redirect.into_response();
        response.headers()[header::LOCATION]
            .to_str()
            .unwrap()
            .to_string()
    }

    #[test]
    fn redirect_back_keeps_only_the_local_path() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::REFERER,
            HeaderValue::from_static("https://evil.example/threads/abc?x=1"),
        );
        assert_eq!(location(redirect_back(&headers, "/")), "/threads/abc?x=1");
    }

    #[test]
    fn redirect_back_falls_back_without_referer() {
        assert_eq!(location(redirect_back(&HeaderMap::new(), "/threads")), "/threads");

        let mut headers = HeaderMap::new();
        headers.insert(header::REFERER, HeaderValue::from_static("not a uri at all"));
        assert_eq!(location(redirect_back(&headers, "/threads")), "/threads");
    }
}
