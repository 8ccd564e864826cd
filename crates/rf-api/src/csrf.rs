//! CSRF protection for the forum's HTML forms
//!
//! Each session carries one random token. Pages embed it in a hidden
//! `csrf_token` field and every POST handler unwraps its form through
//! [`CsrfProtectedForm::verify`].

use crate::error::WebError;
use serde::Deserialize;
use subtle::ConstantTimeEq;
use tower_sessions::Session;
use tracing::{debug, warn};
use uuid::Uuid;

const CSRF_KEY: &str = "csrf_token";

/// Get or create the CSRF token for the current session
pub async fn token(session: &Session) -> Result<String, WebError> {
    if let Some(existing) = session.get::<String>(CSRF_KEY).await? {
        return Ok(existing);
    }

    debug!("issuing new CSRF token");
    let token = Uuid::new_v4().simple().to_string();
    session.insert(CSRF_KEY, &token).await?;
    Ok(token)
}

/// Form data wrapper that includes CSRF token validation
#[derive(Debug, Deserialize)]
pub struct CsrfProtectedForm<T> {
    #[serde(default)]
    pub csrf_token: String,
    #[serde(flatten)]
    pub data: T,
}

impl<T> CsrfProtectedForm<T> {
    /// Returns the inner form when the submitted token matches the session's.
    pub async fn verify(self, session: &Session) -> Result<T, WebError> {
        let expected = session.get::<String>(CSRF_KEY).await?;
        let matches = expected.is_some_and(|expected| {
            bool::from(expected.as_bytes().ct_eq(self.csrf_token.as_bytes()))
        });

        if matches {
            Ok(self.data)
        } else {
            warn!("rejected form submission with bad CSRF token");
            Err(WebError::Csrf)
        }
    }
}

/// For POST routes whose only field is the token.
#[derive(Debug, Default, Deserialize)]
pub struct NoFields {}
