//! # rf-ui
//!
//! Askama page templates and the small view models they share.

use askama::Template;
use rf_core::models::{Comment, Post, PostListing, Thread, User};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-request data every page layout needs.
#[derive(Debug, Default)]
pub struct SessionData {
    pub user: Option<User>,
    /// One-shot notice carried across the previous redirect.
    pub flash: Option<String>,
    /// Values and errors of a rejected submission, carried across the redirect.
    pub form: FormState,
    pub csrf_token: String,
}

/// Submitted form values plus per-field validation errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    values: BTreeMap<String, String>,
    errors: BTreeMap<String, String>,
}

impl FormState {
    pub fn set_value(&mut self, field: &str, value: &str) {
        self.values.insert(field.to_string(), value.to_string());
    }

    pub fn add_error(&mut self, field: &str, message: &str) {
        self.errors.insert(field.to_string(), message.to_string());
    }

    /// The previously submitted value, or an empty string.
    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or_default()
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate<'a> {
    pub session: &'a SessionData,
    pub posts: &'a [PostListing],
}

#[derive(Template)]
#[template(path = "threads.html")]
pub struct ThreadsTemplate<'a> {
    pub session: &'a SessionData,
    pub threads: &'a [Thread],
}

#[derive(Template)]
#[template(path = "thread.html")]
pub struct ThreadTemplate<'a> {
    pub session: &'a SessionData,
    pub thread: &'a Thread,
    pub posts: &'a [PostListing],
}

#[derive(Template)]
#[template(path = "thread_create.html")]
pub struct ThreadCreateTemplate<'a> {
    pub session: &'a SessionData,
}

#[derive(Template)]
#[template(path = "post.html")]
pub struct PostTemplate<'a> {
    pub session: &'a SessionData,
    pub thread: &'a Thread,
    pub post: &'a Post,
    pub comments: &'a [Comment],
}

#[derive(Template)]
#[template(path = "post_create.html")]
pub struct PostCreateTemplate<'a> {
    pub session: &'a SessionData,
    pub thread: &'a Thread,
}

#[derive(Template)]
#[template(path = "user_register.html")]
pub struct RegisterTemplate<'a> {
    pub session: &'a SessionData,
}

#[derive(Template)]
#[template(path = "user_login.html")]
pub struct LoginTemplate<'a> {
    pub session: &'a SessionData,
}

/// Rendered for failures; never carries internal error details.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub session: &'a SessionData,
    pub status: u16,
    pub message: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn layout_shows_flash_and_username() {
        let session = SessionData {
            user: Some(User {
                id: Uuid::new_v4(),
                username: "alice".into(),
                password: String::new(),
            }),
            flash: Some("Your new thread has been created.".into()),
            ..SessionData::default()
        };
        let html = ThreadsTemplate {
            session: &session,
            threads: &[],
        }
        .render()
        .unwrap();

        assert!(html.contains("Your new thread has been created."));
        assert!(html.contains("alice"));
        assert!(html.contains("/logout"));
    }

    #[test]
    fn user_content_is_escaped() {
        let session = SessionData::default();
        let thread = Thread::new("<script>alert(1)</script>", "desc");
        let html = ThreadTemplate {
            session: &session,
            thread: &thread,
            posts: &[],
        }
        .render()
        .unwrap();

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("alert(1)"));
    }

    #[test]
    fn forms_carry_csrf_token_and_previous_input() {
        let mut form = FormState::default();
        form.set_value("title", "Half-written");
        form.add_error("description", "Please enter a description.");
        let session = SessionData {
            form,
            csrf_token: "tok123".into(),
            ..SessionData::default()
        };
        let html = ThreadCreateTemplate { session: &session }.render().unwrap();

        assert!(html.contains(r#"name="csrf_token" value="tok123""#));
        assert!(html.contains("Half-written"));
        assert!(html.contains("Please enter a description."));
    }

    #[test]
    fn post_page_lists_comments_with_vote_links() {
        let session = SessionData::default();
        let thread = Thread::new("Go", "Go lang");
        let post = Post::new(thread.id, "Hello", "World");
        let comment = Comment::new(post.id, "first!");
        let html = PostTemplate {
            session: &session,
            thread: &thread,
            post: &post,
            comments: std::slice::from_ref(&comment),
        }
        .render()
        .unwrap();

        assert!(html.contains("first!"));
        assert!(html.contains(&format!("/comments/{}/vote?dir=up", comment.id)));
        assert!(html.contains(&format!(
            "/threads/{}/posts/{}/vote?dir=down",
            thread.id, post.id
        )));
    }
}
