//! # rf-db-sqlite Implementation
//!
//! This crate implements the data mapping between the SQLite relational model
//! and the `rf-core` domain models. One `SqliteForumRepo` implements every
//! repository port; it is cheap to clone since it only holds the pool.

mod comments;
mod posts;
mod threads;
mod users;

use rf_core::error::AppError;
use rf_core::models::{Comment, Entity, Post, PostListing, Thread, User};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

#[derive(Clone, Debug)]
pub struct SqliteForumRepo {
    pool: SqlitePool,
}

impl SqliteForumRepo {
    /// Opens (creating if needed) the database at `url` and applies pending migrations.
    ///
    /// In-memory databases are pinned to a single connection that is never
    /// recycled, otherwise every pooled connection would see its own empty database.
    pub async fn new(
        url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(acquire_timeout);

        let in_memory = url.contains(":memory:") || url.contains("mode=memory");
        let pool_options = SqlitePoolOptions::new().acquire_timeout(acquire_timeout);
        let pool_options = if in_memory {
            pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            pool_options.max_connections(max_connections)
        };

        let pool = pool_options.connect_with(options).await?;
        MIGRATOR.run(&pool).await?;
        info!(in_memory, "sqlite store ready");

        Ok(Self { pool })
    }

    /// A fresh, migrated, private in-memory database.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        Self::new("sqlite::memory:", 1, Duration::from_secs(5)).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Translates an sqlx failure into the core taxonomy, keeping entity and action as context.
pub(crate) fn store_error(err: sqlx::Error, entity: Entity, action: &'static str) -> AppError {
    match err {
        sqlx::Error::Database(db) if db.is_unique_violation() => AppError::Conflict {
            entity,
            detail: db.message().to_string(),
        },
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => AppError::Conflict {
            entity,
            detail: format!("referenced parent does not exist ({})", db.message()),
        },
        sqlx::Error::Database(db) if db.is_check_violation() => {
            AppError::ValidationFailed(format!("{entity}: {}", db.message()))
        }
        other => AppError::StoreUnavailable {
            entity,
            action,
            source: Box::new(other),
        },
    }
}

// Row mappers. Column names match both the SELECT lists and the RETURNING clauses.

pub(crate) fn user_from_row(row: &SqliteRow) -> Result<User, sqlx::Error> {
    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        password: row.try_get("password")?,
    })
}

pub(crate) fn thread_from_row(row: &SqliteRow) -> Result<Thread, sqlx::Error> {
    Ok(Thread {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
    })
}

pub(crate) fn post_from_row(row: &SqliteRow) -> Result<Post, sqlx::Error> {
    Ok(Post {
        id: row.try_get("id")?,
        thread_id: row.try_get("thread_id")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        votes: row.try_get("votes")?,
    })
}

pub(crate) fn listing_from_row(row: &SqliteRow) -> Result<PostListing, sqlx::Error> {
    Ok(PostListing {
        post: post_from_row(row)?,
        thread_title: row.try_get("thread_title")?,
        comments_count: row.try_get("comments_count")?,
    })
}

pub(crate) fn comment_from_row(row: &SqliteRow) -> Result<Comment, sqlx::Error> {
    Ok(Comment {
        id: row.try_get("id")?,
        post_id: row.try_get("post_id")?,
        content: row.try_get("content")?,
        votes: row.try_get("votes")?,
    })
}
