use crate::{store_error, user_from_row, SqliteForumRepo};
use async_trait::async_trait;
use rf_core::error::{AppError, Result};
use rf_core::models::{Entity, User};
use rf_core::traits::UserRepo;
use uuid::Uuid;

#[async_trait]
impl UserRepo for SqliteForumRepo {
    async fn get_user(&self, id: Uuid) -> Result<User> {
        let row = sqlx::query("SELECT id, username, password FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error(e, Entity::User, "get"))?;

        match row {
            Some(row) => user_from_row(&row).map_err(|e| store_error(e, Entity::User, "decode")),
            None => Err(AppError::not_found(Entity::User, id)),
        }
    }

    async fn get_user_by_username(&self, username: &str) -> Result<User> {
        let row = sqlx::query("SELECT id, username, password FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error(e, Entity::User, "get"))?;

        match row {
            Some(row) => user_from_row(&row).map_err(|e| store_error(e, Entity::User, "decode")),
            None => Err(AppError::not_found(Entity::User, username)),
        }
    }

    async fn create_user(&self, user: User) -> Result<User> {
        let row = sqlx::query(
            "INSERT INTO users (id, username, password) VALUES (?, ?, ?) \
             RETURNING id, username, password",
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.password)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| store_error(e, Entity::User, "create"))?;

        user_from_row(&row).map_err(|e| store_error(e, Entity::User, "decode"))
    }

    async fn update_user(&self, user: User) -> Result<User> {
        let row = sqlx::query(
            "UPDATE users SET username = ?, password = ? WHERE id = ? \
             RETURNING id, username, password",
        )
        .bind(&user.username)
        .bind(&user.password)
        .bind(user.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error(e, Entity::User, "update"))?;

        match row {
            Some(row) => user_from_row(&row).map_err(|e| store_error(e, Entity::User, "decode")),
            None => Err(AppError::not_found(Entity::User, user.id)),
        }
    }

    async fn delete_user(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error(e, Entity::User, "delete"))?;
        Ok(())
    }
}
