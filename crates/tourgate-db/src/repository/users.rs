//! User operations

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::error::DbError;
use crate::models::{Credentials, NewUser, User};
use crate::repository::Database;
use crate::store::UserStore;

#[async_trait]
impl UserStore for Database {
    async fn create_user(&self, user: NewUser) -> Result<User, DbError> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().trunc_subsecs(0);

        sqlx::query(
            r#"
            INSERT INTO users (id, name, username, email, password_hash, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&user.name)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| DbError::from_insert(e, &format!("user '{}'", user.username)))?;

        debug!("Inserted user {} ({})", user.username, id);

        Ok(User {
            id,
            name: user.name,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
        })
    }

    async fn find_credentials(&self, username: &str) -> Result<Credentials, DbError> {
        let row = sqlx::query(
            r#"
            SELECT id, password_hash
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Credentials::try_from(&row)?),
            None => Err(DbError::NotFound(format!("user '{}'", username))),
        }
    }

    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>, DbError> {
        let result = sqlx::query(
            r#"
            SELECT id, name, username, email, password_hash, created_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        result.map(|row| User::try_from(&row).map_err(DbError::from)).transpose()
    }
}

impl Database {
    /// Count stored users
    pub async fn count_users(&self) -> Result<i64, DbError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            name: "Test User".to_string(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find_credentials() {
        let db = Database::in_memory().await.unwrap();

        let user = db.create_user(new_user("alice", "a@x.com")).await.unwrap();
        assert!(!user.id.is_empty());
        assert_eq!(user.username, "alice");

        let creds = db.find_credentials("alice").await.unwrap();
        assert_eq!(creds.user_id, user.id);
        assert_eq!(creds.password_hash, user.password_hash);

        let loaded = db.get_user_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(loaded.email, "a@x.com");
        assert_eq!(loaded.created_at, user.created_at);
    }

    #[tokio::test]
    async fn test_generated_ids_are_unique() {
        let db = Database::in_memory().await.unwrap();

        let a = db.create_user(new_user("alice", "a@x.com")).await.unwrap();
        let b = db.create_user(new_user("bob", "b@x.com")).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let db = Database::in_memory().await.unwrap();

        db.create_user(new_user("alice", "a@x.com")).await.unwrap();
        let err = db
            .create_user(new_user("alice", "other@x.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::Duplicate(_)));
        assert_eq!(db.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let db = Database::in_memory().await.unwrap();

        db.create_user(new_user("alice", "a@x.com")).await.unwrap();
        let err = db.create_user(new_user("bob", "a@x.com")).await.unwrap_err();

        assert!(matches!(err, DbError::Duplicate(_)));
        assert_eq!(db.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unknown_username_not_found() {
        let db = Database::in_memory().await.unwrap();

        let err = db.find_credentials("nobody").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_user_by_unknown_id() {
        let db = Database::in_memory().await.unwrap();

        assert!(db.get_user_by_id("missing").await.unwrap().is_none());
    }
}
