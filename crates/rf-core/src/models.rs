//! # Domain Models
//!
//! These structs represent the core entities of Rusty-Forum.
//! Identifiers are random UUID v4 values assigned by the caller before a create.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    /// PHC-formatted password hash produced by the `AuthProvider`. Never plaintext.
    #[serde(skip_serializing)]
    pub password: String,
}

/// A top-level discussion topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    pub id: Uuid,
    pub title: String,
    pub description: String,
}

/// A submission within a Thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub thread_id: Uuid,
    pub title: String,
    pub content: String,
    pub votes: i64,
}

/// Read-only projection of a Post used by listings.
///
/// `thread_title` and `comments_count` are aggregated at read time and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostListing {
    pub post: Post,
    pub thread_title: String,
    pub comments_count: i64,
}

/// A reply attached to a Post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub content: String,
    pub votes: i64,
}

impl Thread {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
        }
    }
}

impl Post {
    /// A fresh post under `thread_id` with a zero vote count.
    pub fn new(thread_id: Uuid, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            thread_id,
            title: title.into(),
            content: content.into(),
            votes: 0,
        }
    }
}

impl Comment {
    pub fn new(post_id: Uuid, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            post_id,
            content: content.into(),
            votes: 0,
        }
    }
}

/// Direction token of a vote request.
///
/// Anything other than `up` or `down` parses to [`VoteDirection::Neutral`],
/// which leaves the counter untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDirection {
    Up,
    Down,
    Neutral,
}

impl VoteDirection {
    pub fn parse(token: &str) -> Self {
        match token {
            "up" => Self::Up,
            "down" => Self::Down,
            _ => Self::Neutral,
        }
    }

    /// The amount added to the stored vote count.
    pub fn delta(self) -> i64 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
            Self::Neutral => 0,
        }
    }
}

/// The entity kinds, used to give store errors their context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    User,
    Thread,
    Post,
    Comment,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::User => "user",
            Self::Thread => "thread",
            Self::Post => "post",
            Self::Comment => "comment",
        })
    }
}
