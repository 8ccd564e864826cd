//! # Core Traits (Ports)
//!
//! Any plugin must implement these traits to be used by the binary.
//! One repository port per entity; a single adapter type may implement all of them.

use crate::error::Result;
use crate::models::{Comment, Post, PostListing, Thread, User, VoteDirection};
use async_trait::async_trait;
use uuid::Uuid;

/// Persistence contract for threads.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ThreadRepo: Send + Sync {
    async fn get_thread(&self, id: Uuid) -> Result<Thread>;
    /// All threads in store-natural (insertion) order.
    async fn list_threads(&self) -> Result<Vec<Thread>>;
    async fn create_thread(&self, thread: Thread) -> Result<Thread>;
    async fn update_thread(&self, thread: Thread) -> Result<Thread>;
    /// Removes the thread together with its posts and their comments.
    /// Deleting an unknown id is not an error.
    async fn delete_thread(&self, id: Uuid) -> Result<()>;
}

/// Persistence contract for posts, including the vote counter.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait PostRepo: Send + Sync {
    async fn get_post(&self, id: Uuid) -> Result<Post>;
    /// Every post with its thread title and comment count, highest votes first.
    async fn list_posts_with_counts(&self) -> Result<Vec<PostListing>>;
    /// Posts of one thread with comment counts, highest votes first.
    async fn list_posts_by_thread(&self, thread_id: Uuid) -> Result<Vec<PostListing>>;
    async fn create_post(&self, post: Post) -> Result<Post>;
    async fn update_post(&self, post: Post) -> Result<Post>;
    async fn delete_post(&self, id: Uuid) -> Result<()>;
    /// Adjusts the vote count in a single atomic statement and returns the updated post.
    async fn apply_post_vote(&self, id: Uuid, direction: VoteDirection) -> Result<Post>;
}

/// Persistence contract for comments, including the vote counter.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CommentRepo: Send + Sync {
    async fn get_comment(&self, id: Uuid) -> Result<Comment>;
    async fn list_comments(&self) -> Result<Vec<Comment>>;
    async fn list_comments_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>>;
    async fn create_comment(&self, comment: Comment) -> Result<Comment>;
    async fn update_comment(&self, comment: Comment) -> Result<Comment>;
    async fn delete_comment(&self, id: Uuid) -> Result<()>;
    async fn apply_comment_vote(&self, id: Uuid, direction: VoteDirection) -> Result<Comment>;
}

/// Persistence contract for user accounts.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn get_user(&self, id: Uuid) -> Result<User>;
    async fn get_user_by_username(&self, username: &str) -> Result<User>;
    /// Fails with `Conflict` when the id or the username is already taken.
    async fn create_user(&self, user: User) -> Result<User>;
    async fn update_user(&self, user: User) -> Result<User>;
    async fn delete_user(&self, id: Uuid) -> Result<()>;
}

/// Password hashing contract.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Produces a salted, slow one-way hash of `password`.
    async fn hash_password(&self, password: &str) -> Result<String>;

    /// Verifies a plaintext password against a stored hash.
    /// A malformed hash counts as a mismatch.
    async fn verify_password(&self, password: &str, hash: &str) -> bool;
}
