//! rusty-forum/crates/rf-core/src/lib.rs
//!
//! The central domain logic and interface definitions for Rusty-Forum.

pub mod accounts;
pub mod error;
pub mod models;
pub mod traits;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use traits::*;

#[cfg(test)]
mod tests {
    use super::models::*;

    #[test]
    fn new_posts_and_comments_start_at_zero_votes() {
        let thread = Thread::new("Go", "Go lang");
        let post = Post::new(thread.id, "Hello", "World");
        let comment = Comment::new(post.id, "first");

        assert_eq!(post.thread_id, thread.id);
        assert_eq!(post.votes, 0);
        assert_eq!(comment.post_id, post.id);
        assert_eq!(comment.votes, 0);
        assert_ne!(thread.id, post.id);
    }

    #[test]
    fn vote_tokens_other_than_up_and_down_are_neutral() {
        assert_eq!(VoteDirection::parse("up").delta(), 1);
        assert_eq!(VoteDirection::parse("down").delta(), -1);
        for token in ["", "UP", "sideways", "up "] {
            assert_eq!(VoteDirection::parse(token), VoteDirection::Neutral);
            assert_eq!(VoteDirection::parse(token).delta(), 0);
        }
    }

    #[test]
    fn user_password_is_not_serialized() {
        let user = User {
            id: uuid::Uuid::new_v4(),
            username: "alice".into(),
            password: "$argon2id$secret".into(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2id"));
    }
}
