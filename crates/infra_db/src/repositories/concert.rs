//! Concert repository implementation
//!
//! A concert is spread over three tables: `concerts`, its schedule in
//! `concert_dates`, and its line-up through `concert_performers`. Both read
//! paths load all three inside a single transaction so a concert is never
//! observed half-written.

use chrono::NaiveDateTime;
use sqlx::PgPool;
use std::collections::HashMap;

use crate::error::DatabaseError;
use super::{begin, commit};
use super::performer::PerformerRow;

/// Repository for concerts with their dates and performers
#[derive(Debug, Clone)]
pub struct ConcertRepository {
    pool: PgPool,
}

impl ConcertRepository {
    /// Creates a new ConcertRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves a concert with its schedule and line-up
    ///
    /// # Returns
    ///
    /// The assembled concert, or `None` if the id is unknown
    pub async fn get_by_id(&self, concert_id: i64) -> Result<Option<ConcertWithDetails>, DatabaseError> {
        let mut tx = begin(&self.pool).await?;

        let Some(concert) = sqlx::query_as::<_, ConcertRow>(
            r#"
            SELECT id, name, image_name, blurb
            FROM concerts
            WHERE id = $1
            "#,
        )
        .bind(concert_id)
        .fetch_optional(&mut *tx)
        .await?
        else {
            commit(tx).await?;
            return Ok(None);
        };

        let dates = sqlx::query_as::<_, ConcertDateRow>(
            r#"
            SELECT concert_id, date
            FROM concert_dates
            WHERE concert_id = $1
            ORDER BY date
            "#,
        )
        .bind(concert_id)
        .fetch_all(&mut *tx)
        .await?;

        let performers = sqlx::query_as::<_, ConcertPerformerRow>(
            r#"
            SELECT cp.concert_id, p.id, p.name, p.image_name, p.genre, p.blurb
            FROM concert_performers cp
            JOIN performers p ON p.id = cp.performer_id
            WHERE cp.concert_id = $1
            ORDER BY p.id
            "#,
        )
        .bind(concert_id)
        .fetch_all(&mut *tx)
        .await?;

        commit(tx).await?;

        Ok(Some(ConcertWithDetails {
            concert,
            dates: dates.into_iter().map(|row| row.date).collect(),
            performers: performers.into_iter().map(|row| row.performer).collect(),
        }))
    }

    /// Retrieves every concert in key order
    ///
    /// Dates and performers for all concerts are fetched with one query each
    /// and grouped in memory.
    pub async fn list_all(&self) -> Result<Vec<ConcertWithDetails>, DatabaseError> {
        let mut tx = begin(&self.pool).await?;

        let concerts = sqlx::query_as::<_, ConcertRow>(
            r#"
            SELECT id, name, image_name, blurb
            FROM concerts
            ORDER BY id
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        let dates = sqlx::query_as::<_, ConcertDateRow>(
            r#"
            SELECT concert_id, date
            FROM concert_dates
            ORDER BY concert_id, date
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        let performers = sqlx::query_as::<_, ConcertPerformerRow>(
            r#"
            SELECT cp.concert_id, p.id, p.name, p.image_name, p.genre, p.blurb
            FROM concert_performers cp
            JOIN performers p ON p.id = cp.performer_id
            ORDER BY cp.concert_id, p.id
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        commit(tx).await?;

        Ok(assemble(concerts, dates, performers))
    }
}

fn assemble(
    concerts: Vec<ConcertRow>,
    dates: Vec<ConcertDateRow>,
    performers: Vec<ConcertPerformerRow>,
) -> Vec<ConcertWithDetails> {
    let mut dates_by_concert: HashMap<i64, Vec<NaiveDateTime>> = HashMap::new();
    for row in dates {
        dates_by_concert.entry(row.concert_id).or_default().push(row.date);
    }

    let mut performers_by_concert: HashMap<i64, Vec<PerformerRow>> = HashMap::new();
    for row in performers {
        performers_by_concert
            .entry(row.concert_id)
            .or_default()
            .push(row.performer);
    }

    concerts
        .into_iter()
        .map(|concert| ConcertWithDetails {
            dates: dates_by_concert.remove(&concert.id).unwrap_or_default(),
            performers: performers_by_concert.remove(&concert.id).unwrap_or_default(),
            concert,
        })
        .collect()
}

/// Database row for a concert
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ConcertRow {
    pub id: i64,
    pub name: String,
    pub image_name: Option<String>,
    pub blurb: Option<String>,
}

/// Database row for one scheduled concert date
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ConcertDateRow {
    pub concert_id: i64,
    pub date: NaiveDateTime,
}

/// Database row joining a concert to one of its performers
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ConcertPerformerRow {
    pub concert_id: i64,
    #[sqlx(flatten)]
    pub performer: PerformerRow,
}

/// A concert row with its schedule and line-up
#[derive(Debug, Clone)]
pub struct ConcertWithDetails {
    pub concert: ConcertRow,
    pub dates: Vec<NaiveDateTime>,
    pub performers: Vec<PerformerRow>,
}
