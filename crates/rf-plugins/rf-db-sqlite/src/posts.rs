use crate::{listing_from_row, post_from_row, store_error, SqliteForumRepo};
use async_trait::async_trait;
use rf_core::error::{AppError, Result};
use rf_core::models::{Entity, Post, PostListing, VoteDirection};
use rf_core::traits::PostRepo;
use tracing::debug;
use uuid::Uuid;

const POST_COLUMNS: &str = "id, thread_id, title, content, votes";

// Ties keep insertion order so listings are stable between requests.
const LISTING_SELECT: &str = "\
    SELECT posts.id, posts.thread_id, posts.title, posts.content, posts.votes,
           threads.title AS thread_title,
           COUNT(comments.id) AS comments_count
    FROM posts
    JOIN threads ON threads.id = posts.thread_id
    LEFT JOIN comments ON comments.post_id = posts.id";

const LISTING_ORDER: &str = "GROUP BY posts.id ORDER BY posts.votes DESC, posts.rowid ASC";

#[async_trait]
impl PostRepo for SqliteForumRepo {
    async fn get_post(&self, id: Uuid) -> Result<Post> {
        let row = sqlx::query(&format!("SELECT {POST_COLUMNS} FROM posts WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error(e, Entity::Post, "get"))?;

        match row {
            Some(row) => post_from_row(&row).map_err(|e| store_error(e, Entity::Post, "decode")),
            None => Err(AppError::not_found(Entity::Post, id)),
        }
    }

    async fn list_posts_with_counts(&self) -> Result<Vec<PostListing>> {
        sqlx::query(&format!("{LISTING_SELECT} {LISTING_ORDER}"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| store_error(e, Entity::Post, "list"))?
            .iter()
            .map(listing_from_row)
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| store_error(e, Entity::Post, "decode"))
    }

    async fn list_posts_by_thread(&self, thread_id: Uuid) -> Result<Vec<PostListing>> {
        sqlx::query(&format!(
            "{LISTING_SELECT} WHERE posts.thread_id = ? {LISTING_ORDER}"
        ))
        .bind(thread_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_error(e, Entity::Post, "list"))?
        .iter()
        .map(listing_from_row)
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| store_error(e, Entity::Post, "decode"))
    }

    async fn create_post(&self, post: Post) -> Result<Post> {
        let row = sqlx::query(&format!(
            "INSERT INTO posts ({POST_COLUMNS}) VALUES (?, ?, ?, ?, ?) RETURNING {POST_COLUMNS}"
        ))
        .bind(post.id)
        .bind(post.thread_id)
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.votes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| store_error(e, Entity::Post, "create"))?;

        post_from_row(&row).map_err(|e| store_error(e, Entity::Post, "decode"))
    }

    async fn update_post(&self, post: Post) -> Result<Post> {
        let row = sqlx::query(&format!(
            "UPDATE posts SET thread_id = ?, title = ?, content = ?, votes = ? WHERE id = ? \
             RETURNING {POST_COLUMNS}"
        ))
        .bind(post.thread_id)
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.votes)
        .bind(post.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error(e, Entity::Post, "update"))?;

        match row {
            Some(row) => post_from_row(&row).map_err(|e| store_error(e, Entity::Post, "decode")),
            None => Err(AppError::not_found(Entity::Post, post.id)),
        }
    }

    async fn delete_post(&self, id: Uuid) -> Result<()> {
        let done = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error(e, Entity::Post, "delete"))?;

        debug!(post_id = %id, rows = done.rows_affected(), "post deleted");
        Ok(())
    }

    async fn apply_post_vote(&self, id: Uuid, direction: VoteDirection) -> Result<Post> {
        if direction == VoteDirection::Neutral {
            return self.get_post(id).await;
        }

        let row = sqlx::query(&format!(
            "UPDATE posts SET votes = votes + ? WHERE id = ? RETURNING {POST_COLUMNS}"
        ))
        .bind(direction.delta())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error(e, Entity::Post, "vote"))?;

        match row {
            Some(row) => post_from_row(&row).map_err(|e| store_error(e, Entity::Post, "decode")),
            None => Err(AppError::not_found(Entity::Post, id)),
        }
    }
}
