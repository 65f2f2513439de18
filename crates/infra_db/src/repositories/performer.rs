//! Performer repository implementation

use sqlx::PgPool;

use crate::error::DatabaseError;
use super::{begin, commit};

/// Repository for the `performers` table
#[derive(Debug, Clone)]
pub struct PerformerRepository {
    pool: PgPool,
}

impl PerformerRepository {
    /// Creates a new PerformerRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves a performer by id
    ///
    /// # Returns
    ///
    /// The performer row, or `None` if the id is unknown
    pub async fn get_by_id(&self, performer_id: i64) -> Result<Option<PerformerRow>, DatabaseError> {
        let mut tx = begin(&self.pool).await?;

        let performer = sqlx::query_as::<_, PerformerRow>(
            r#"
            SELECT id, name, image_name, genre, blurb
            FROM performers
            WHERE id = $1
            "#,
        )
        .bind(performer_id)
        .fetch_optional(&mut *tx)
        .await?;

        commit(tx).await?;
        Ok(performer)
    }

    /// Retrieves every performer in key order
    pub async fn list_all(&self) -> Result<Vec<PerformerRow>, DatabaseError> {
        let mut tx = begin(&self.pool).await?;

        let performers = sqlx::query_as::<_, PerformerRow>(
            r#"
            SELECT id, name, image_name, genre, blurb
            FROM performers
            ORDER BY id
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        commit(tx).await?;
        Ok(performers)
    }
}

/// Genre enumeration, stored as the `genre` PostgreSQL enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "genre", rename_all = "snake_case")]
pub enum Genre {
    Pop,
    HipHop,
    RhythmAndBlues,
    Acappella,
    Metal,
    Rock,
}

/// Database row for a performer
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PerformerRow {
    pub id: i64,
    pub name: String,
    pub image_name: Option<String>,
    pub genre: Genre,
    pub blurb: Option<String>,
}
