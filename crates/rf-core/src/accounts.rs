//! # Accounts
//!
//! Registration and login rules, written against the `UserRepo` and
//! `AuthProvider` ports so they stay independent of storage and hashing.

use crate::error::{AppError, Result};
use crate::models::{Entity, User};
use crate::traits::{AuthProvider, UserRepo};
use tracing::{debug, info};
use uuid::Uuid;

/// Creates a new account.
///
/// The username lookup is only a fast path: two concurrent registrations can
/// both pass it, in which case the store's unique constraint decides and the
/// loser receives the `Conflict` from `create_user`.
pub async fn register(
    users: &dyn UserRepo,
    auth: &dyn AuthProvider,
    id: Uuid,
    username: &str,
    password: &str,
) -> Result<User> {
    match users.get_user_by_username(username).await {
        Ok(_) => {
            return Err(AppError::Conflict {
                entity: Entity::User,
                detail: format!("username {username} is already taken"),
            })
        }
        Err(e) if e.is_not_found() => {}
        Err(e) => return Err(e),
    }

    let password = auth.hash_password(password).await?;
    let user = users
        .create_user(User {
            id,
            username: username.to_string(),
            password,
        })
        .await?;

    info!(user_id = %user.id, "registered new user");
    Ok(user)
}

/// Checks a username/password pair.
///
/// An unknown username and a wrong password produce the same
/// [`AppError::InvalidCredentials`].
pub async fn login(
    users: &dyn UserRepo,
    auth: &dyn AuthProvider,
    username: &str,
    password: &str,
) -> Result<User> {
    let user = match users.get_user_by_username(username).await {
        Ok(user) => user,
        Err(e) if e.is_not_found() => {
            debug!("login attempt for unknown username");
            return Err(AppError::InvalidCredentials);
        }
        Err(e) => return Err(e),
    };

    if auth.verify_password(password, &user.password).await {
        Ok(user)
    } else {
        debug!(user_id = %user.id, "login attempt with wrong password");
        Err(AppError::InvalidCredentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{MockAuthProvider, MockUserRepo};

    fn stored_user(username: &str) -> User {
        User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password: "$argon2id$stored".to_string(),
        }
    }

    #[tokio::test]
    async fn register_rejects_taken_username_without_creating() {
        let mut users = MockUserRepo::new();
        users
            .expect_get_user_by_username()
            .returning(|name| Ok(stored_user(name)));
        users.expect_create_user().never();
        let mut auth = MockAuthProvider::new();
        auth.expect_hash_password().never();

        let err = register(&users, &auth, Uuid::new_v4(), "alice", "password123")
            .await
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn register_hashes_before_storing() {
        let mut users = MockUserRepo::new();
        users
            .expect_get_user_by_username()
            .returning(|name| Err(AppError::not_found(Entity::User, name)));
        users
            .expect_create_user()
            .withf(|u| u.username == "alice" && u.password == "hashed:password123")
            .times(1)
            .returning(Ok);
        let mut auth = MockAuthProvider::new();
        auth.expect_hash_password()
            .returning(|p| Ok(format!("hashed:{p}")));

        let id = Uuid::new_v4();
        let user = register(&users, &auth, id, "alice", "password123")
            .await
            .unwrap();
        assert_eq!(user.id, id);
        assert_ne!(user.password, "password123");
    }

    #[tokio::test]
    async fn register_surfaces_store_conflict_from_race() {
        let mut users = MockUserRepo::new();
        users
            .expect_get_user_by_username()
            .returning(|name| Err(AppError::not_found(Entity::User, name)));
        users.expect_create_user().returning(|_| {
            Err(AppError::Conflict {
                entity: Entity::User,
                detail: "UNIQUE constraint failed: users.username".into(),
            })
        });
        let mut auth = MockAuthProvider::new();
        auth.expect_hash_password().returning(|_| Ok("h".into()));

        let err = register(&users, &auth, Uuid::new_v4(), "alice", "password123")
            .await
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn login_errors_are_indistinguishable() {
        let mut users = MockUserRepo::new();
        users
            .expect_get_user_by_username()
            .returning(|name| match name {
                "alice" => Ok(stored_user("alice")),
                other => Err(AppError::not_found(Entity::User, other)),
            });
        let mut auth = MockAuthProvider::new();
        auth.expect_verify_password().returning(|_, _| false);

        let wrong_password = login(&users, &auth, "alice", "nope").await.unwrap_err();
        let unknown_user = login(&users, &auth, "bob", "nope").await.unwrap_err();

        assert!(matches!(wrong_password, AppError::InvalidCredentials));
        assert!(matches!(unknown_user, AppError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    }

    #[tokio::test]
    async fn login_returns_user_on_match() {
        let mut users = MockUserRepo::new();
        users
            .expect_get_user_by_username()
            .returning(|name| Ok(stored_user(name)));
        let mut auth = MockAuthProvider::new();
        auth.expect_verify_password().returning(|_, _| true);

        let user = login(&users, &auth, "alice", "password123").await.unwrap();
        assert_eq!(user.username, "alice");
    }
}
