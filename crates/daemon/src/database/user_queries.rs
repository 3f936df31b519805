use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use common::identity::UserDirectory;

use super::Database;

/// One row of the users table.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, thiserror::Error)]
pub enum UserStoreError {
    #[error("username or email already taken")]
    Conflict,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Database {
    /// Insert a new user record, returning its id.
    ///
    /// Uniqueness of username and email is enforced by the schema; a
    /// violation surfaces as `Conflict`.
    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Uuid, UserStoreError> {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO users (id, username, email, password_hash) VALUES ($1, $2, $3, $4)")
            .bind(id.to_string())
            .bind(username)
            .bind(email)
            .bind(password_hash)
            .execute(&**self)
            .await
            .map_err(|e| {
                if e.as_database_error()
                    .map(|db| db.is_unique_violation())
                    .unwrap_or(false)
                {
                    UserStoreError::Conflict
                } else {
                    UserStoreError::Database(e)
                }
            })?;
        Ok(id)
    }

    /// Look a user up by username or email (one login field serves both).
    pub async fn find_user(&self, login: &str) -> Result<Option<UserRecord>, sqlx::Error> {
        let row = sqlx::query(
            "SELECT id, username, email, password_hash FROM users WHERE username = $1 OR email = $1",
        )
        .bind(login)
        .fetch_optional(&**self)
        .await?;

        row.map(|r| {
            let raw_id: String = r.get("id");
            let id = Uuid::parse_str(&raw_id).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
            Ok(UserRecord {
                id,
                username: r.get("username"),
                email: r.get("email"),
                password_hash: r.get("password_hash"),
            })
        })
        .transpose()
    }

    pub async fn username_for_id(&self, id: Uuid) -> Result<Option<String>, sqlx::Error> {
        let row = sqlx::query("SELECT username FROM users WHERE id = $1")
            .bind(id.to_string())
            .fetch_optional(&**self)
            .await?;
        Ok(row.map(|r| r.get("username")))
    }
}

#[async_trait]
impl UserDirectory for Database {
    async fn username_for(&self, id: Uuid) -> anyhow::Result<Option<String>> {
        Ok(self.username_for_id(id).await?)
    }
}
