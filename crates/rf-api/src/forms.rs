//! Submitted forms and their required-field checks.
//!
//! Validation returns a [`FormState`] holding the retained input and any
//! errors, so a rejected form can be re-displayed after the redirect.
//! Passwords are never retained.

use rf_ui::FormState;
use serde::Deserialize;

pub const MIN_PASSWORD_LEN: usize = 8;

pub const TITLE_REQUIRED: &str = "Please enter a title.";
pub const DESCRIPTION_REQUIRED: &str = "Please enter a description.";
pub const CONTENT_REQUIRED: &str = "Please enter some content.";
pub const COMMENT_REQUIRED: &str = "Please enter a comment.";
pub const USERNAME_REQUIRED: &str = "Please enter a username.";
pub const USERNAME_TAKEN: &str = "Username is already taken.";
pub const PASSWORD_REQUIRED: &str = "Please enter a password.";
pub const PASSWORD_TOO_SHORT: &str = "Your password must be at least 8 characters long.";
pub const INCORRECT_CREDENTIALS: &str = "Username or password is incorrect.";

pub trait Validate {
    fn validate(&self) -> FormState;
}

fn require(state: &mut FormState, field: &str, value: &str, message: &str) {
    state.set_value(field, value);
    if value.trim().is_empty() {
        state.add_error(field, message);
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ThreadForm {
    pub title: String,
    pub description: String,
}

impl Validate for ThreadForm {
    fn validate(&self) -> FormState {
        let mut state = FormState::default();
        require(&mut state, "title", &self.title, TITLE_REQUIRED);
        require(&mut state, "description", &self.description, DESCRIPTION_REQUIRED);
        state
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PostForm {
    pub title: String,
    pub content: String,
}

impl Validate for PostForm {
    fn validate(&self) -> FormState {
        let mut state = FormState::default();
        require(&mut state, "title", &self.title, TITLE_REQUIRED);
        require(&mut state, "content", &self.content, CONTENT_REQUIRED);
        state
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CommentForm {
    pub content: String,
}

impl Validate for CommentForm {
    fn validate(&self) -> FormState {
        let mut state = FormState::default();
        require(&mut state, "content", &self.content, COMMENT_REQUIRED);
        state
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
}

impl Validate for RegisterForm {
    fn validate(&self) -> FormState {
        let mut state = FormState::default();
        require(&mut state, "username", &self.username, USERNAME_REQUIRED);
        if self.password.is_empty() {
            state.add_error("password", PASSWORD_REQUIRED);
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            state.add_error("password", PASSWORD_TOO_SHORT);
        }
        state
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl Validate for LoginForm {
    fn validate(&self) -> FormState {
        let mut state = FormState::default();
        require(&mut state, "username", &self.username, USERNAME_REQUIRED);
        if self.password.is_empty() {
            state.add_error("password", PASSWORD_REQUIRED);
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_thread_fields_are_flagged() {
        let state = ThreadForm {
            title: "   ".into(),
            description: String::new(),
        }
        .validate();
        assert_eq!(state.error("title"), Some(TITLE_REQUIRED));
        assert_eq!(state.error("description"), Some(DESCRIPTION_REQUIRED));
    }

    #[test]
    fn valid_post_keeps_input_without_errors() {
        let state = PostForm {
            title: "Hello".into(),
            content: "World".into(),
        }
        .validate();
        assert!(!state.has_errors());
        assert_eq!(state.value("title"), "Hello");
        assert_eq!(state.value("content"), "World");
    }

    #[test]
    fn short_password_is_rejected_and_never_retained() {
        let state = RegisterForm {
            username: "alice".into(),
            password: "short".into(),
        }
        .validate();
        assert_eq!(state.error("password"), Some(PASSWORD_TOO_SHORT));
        assert_eq!(state.value("password"), "");
        assert_eq!(state.value("username"), "alice");
    }

    #[test]
    fn login_requires_both_fields() {
        let state = LoginForm::default().validate();
        assert_eq!(state.error("username"), Some(USERNAME_REQUIRED));
        assert_eq!(state.error("password"), Some(PASSWORD_REQUIRED));
    }
}
