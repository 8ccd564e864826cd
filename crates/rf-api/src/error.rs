//! Translation of failures into HTTP responses.
//!
//! Store failures, missing rows and template errors all become the same
//! generic 500 page; details go to the log, never to the client.
//!
//! Error pages are rendered without the request's session, so the navigation
//! always shows the logged-out links, even for a logged-in visitor.

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use rf_core::error::AppError;
use rf_ui::{ErrorTemplate, SessionData};
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum WebError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error("session store error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("template rendering failed: {0}")]
    Render(#[from] askama::Error),

    #[error("missing or mismatched CSRF token")]
    Csrf,
}

impl WebError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Csrf => StatusCode::FORBIDDEN,
            Self::App(AppError::ValidationFailed(_)) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            Self::Csrf => "Your form submission could not be verified. Please reload the page and try again.",
            Self::App(AppError::ValidationFailed(_)) => "The submitted data was not valid.",
            _ => "Something went wrong on our side. Please try again later.",
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = ?self, "request failed");
        } else {
            warn!(error = %self, "request rejected");
        }

        let session = SessionData::default();
        let page = ErrorTemplate {
            session: &session,
            status: status.as_u16(),
            message: self.public_message(),
        }
        .render();

        match page {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => {
                error!(error = %e, "error page failed to render");
                (status, self.public_message()).into_response()
            }
        }
    }
}
