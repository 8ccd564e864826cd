use crate::{store_error, thread_from_row, SqliteForumRepo};
use async_trait::async_trait;
use rf_core::error::{AppError, Result};
use rf_core::models::{Entity, Thread};
use rf_core::traits::ThreadRepo;
use tracing::debug;
use uuid::Uuid;

#[async_trait]
impl ThreadRepo for SqliteForumRepo {
    async fn get_thread(&self, id: Uuid) -> Result<Thread> {
        let row = sqlx::query("SELECT id, title, description FROM threads WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error(e, Entity::Thread, "get"))?;

        match row {
            Some(row) => thread_from_row(&row).map_err(|e| store_error(e, Entity::Thread, "decode")),
            None => Err(AppError::not_found(Entity::Thread, id)),
        }
    }

    async fn list_threads(&self) -> Result<Vec<Thread>> {
        sqlx::query("SELECT id, title, description FROM threads ORDER BY rowid")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| store_error(e, Entity::Thread, "list"))?
            .iter()
            .map(thread_from_row)
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| store_error(e, Entity::Thread, "decode"))
    }

    async fn create_thread(&self, thread: Thread) -> Result<Thread> {
        let row = sqlx::query(
            "INSERT INTO threads (id, title, description) VALUES (?, ?, ?) \
             RETURNING id, title, description",
        )
        .bind(thread.id)
        .bind(&thread.title)
        .bind(&thread.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| store_error(e, Entity::Thread, "create"))?;

        thread_from_row(&row).map_err(|e| store_error(e, Entity::Thread, "decode"))
    }

    async fn update_thread(&self, thread: Thread) -> Result<Thread> {
        let row = sqlx::query(
            "UPDATE threads SET title = ?, description = ? WHERE id = ? \
             RETURNING id, title, description",
        )
        .bind(&thread.title)
        .bind(&thread.description)
        .bind(thread.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error(e, Entity::Thread, "update"))?;

        match row {
            Some(row) => thread_from_row(&row).map_err(|e| store_error(e, Entity::Thread, "decode")),
            None => Err(AppError::not_found(Entity::Thread, thread.id)),
        }
    }

    async fn delete_thread(&self, id: Uuid) -> Result<()> {
        // Posts and their comments go with it via ON DELETE CASCADE.
        let done = sqlx::query("DELETE FROM threads WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error(e, Entity::Thread, "delete"))?;

        debug!(thread_id = %id, rows = done.rows_affected(), "thread deleted");
        Ok(())
    }
}
