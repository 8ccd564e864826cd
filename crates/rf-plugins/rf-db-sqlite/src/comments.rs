use crate::{comment_from_row, store_error, SqliteForumRepo};
use async_trait::async_trait;
use rf_core::error::{AppError, Result};
use rf_core::models::{Comment, Entity, VoteDirection};
use rf_core::traits::CommentRepo;
use tracing::debug;
use uuid::Uuid;

const COMMENT_COLUMNS: &str = "id, post_id, content, votes";

#[async_trait]
impl CommentRepo for SqliteForumRepo {
    async fn get_comment(&self, id: Uuid) -> Result<Comment> {
        let row = sqlx::query(&format!("SELECT {COMMENT_COLUMNS} FROM comments WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error(e, Entity::Comment, "get"))?;

        match row {
            Some(row) => {
                comment_from_row(&row).map_err(|e| store_error(e, Entity::Comment, "decode"))
            }
            None => Err(AppError::not_found(Entity::Comment, id)),
        }
    }

    async fn list_comments(&self) -> Result<Vec<Comment>> {
        sqlx::query(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments ORDER BY votes DESC, rowid ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_error(e, Entity::Comment, "list"))?
        .iter()
        .map(comment_from_row)
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| store_error(e, Entity::Comment, "decode"))
    }

    async fn list_comments_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>> {
        sqlx::query(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE post_id = ? \
             ORDER BY votes DESC, rowid ASC"
        ))
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_error(e, Entity::Comment, "list"))?
        .iter()
        .map(comment_from_row)
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| store_error(e, Entity::Comment, "decode"))
    }

    async fn create_comment(&self, comment: Comment) -> Result<Comment> {
        let row = sqlx::query(&format!(
            "INSERT INTO comments ({COMMENT_COLUMNS}) VALUES (?, ?, ?, ?) \
             RETURNING {COMMENT_COLUMNS}"
        ))
        .bind(comment.id)
        .bind(comment.post_id)
        .bind(&comment.content)
        .bind(comment.votes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| store_error(e, Entity::Comment, "create"))?;

        comment_from_row(&row).map_err(|e| store_error(e, Entity::Comment, "decode"))
    }

    async fn update_comment(&self, comment: Comment) -> Result<Comment> {
        let row = sqlx::query(&format!(
            "UPDATE comments SET post_id = ?, content = ?, votes = ? WHERE id = ? \
             RETURNING {COMMENT_COLUMNS}"
        ))
        .bind(comment.post_id)
        .bind(&comment.content)
        .bind(comment.votes)
        .bind(comment.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error(e, Entity::Comment, "update"))?;

        match row {
            Some(row) => {
                comment_from_row(&row).map_err(|e| store_error(e, Entity::Comment, "decode"))
            }
            None => Err(AppError::not_found(Entity::Comment, comment.id)),
        }
    }

    async fn delete_comment(&self, id: Uuid) -> Result<()> {
        let done = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error(e, Entity::Comment, "delete"))?;

        debug!(comment_id = %id, rows = done.rows_affected(), "comment deleted");
        Ok(())
    }

    async fn apply_comment_vote(&self, id: Uuid, direction: VoteDirection) -> Result<Comment> {
        if direction == VoteDirection::Neutral {
            return self.get_comment(id).await;
        }

        let row = sqlx::query(&format!(
            "UPDATE comments SET votes = votes + ? WHERE id = ? RETURNING {COMMENT_COLUMNS}"
        ))
        .bind(direction.delta())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error(e, Entity::Comment, "vote"))?;

        match row {
            Some(row) => {
                comment_from_row(&row).map_err(|e| store_error(e, Entity::Comment, "decode"))
            }
            None => Err(AppError::not_found(Entity::Comment, id)),
        }
    }
}
