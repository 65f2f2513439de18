//! User repository implementation
//!
//! Sessions live on the user row: `session_token` is unique and a login
//! overwrites it. Racing logins for one user queue on the row lock taken by
//! the `UPDATE`; the last one to commit holds the session.

use sqlx::PgPool;

use crate::error::DatabaseError;
use super::{begin, commit};

/// Repository for the `users` table
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Creates a new UserRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Stores `token` as the session of the user matching both credentials
    ///
    /// The credential check and the token write are a single conditional
    /// update, so a wrong password leaves the previous session intact.
    ///
    /// # Returns
    ///
    /// The updated user row, or `None` if no user has that username and
    /// password
    pub async fn rotate_session(
        &self,
        username: &str,
        password: &str,
        token: &str,
    ) -> Result<Option<UserRow>, DatabaseError> {
        let mut tx = begin(&self.pool).await?;

        let user = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET session_token = $3
            WHERE username = $1 AND password = $2
            RETURNING id, username, password, session_token
            "#,
        )
        .bind(username)
        .bind(password)
        .bind(token)
        .fetch_optional(&mut *tx)
        .await?;

        commit(tx).await?;
        Ok(user)
    }

    /// Retrieves the user currently holding `token`
    pub async fn find_by_session_token(&self, token: &str) -> Result<Option<UserRow>, DatabaseError> {
        let mut tx = begin(&self.pool).await?;

        let user = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password, session_token
            FROM users
            WHERE session_token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&mut *tx)
        .await?;

        commit(tx).await?;
        Ok(user)
    }
}

/// Database row for a user
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub session_token: Option<String>,
}
