//! Seat repository implementation

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::error::DatabaseError;
use super::{begin, commit};

/// Repository for the `seats` table
#[derive(Debug, Clone)]
pub struct SeatRepository {
    pool: PgPool,
}

impl SeatRepository {
    /// Creates a new SeatRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves the seats for one concert date, ordered by label
    ///
    /// `booked` of `None` returns every seat; otherwise only seats whose
    /// booked flag equals it.
    pub async fn list_by_date(
        &self,
        date: NaiveDateTime,
        booked: Option<bool>,
    ) -> Result<Vec<SeatRow>, DatabaseError> {
        let mut tx = begin(&self.pool).await?;

        let seats = sqlx::query_as::<_, SeatRow>(
            r#"
            SELECT id, label, date, price, is_booked, booking_id
            FROM seats
            WHERE date = $1 AND ($2::bool IS NULL OR is_booked = $2)
            ORDER BY label
            "#,
        )
        .bind(date)
        .bind(booked)
        .fetch_all(&mut *tx)
        .await?;

        commit(tx).await?;
        Ok(seats)
    }
}

/// Database row for a seat
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SeatRow {
    pub id: i64,
    pub label: String,
    pub date: NaiveDateTime,
    pub price: Decimal,
    pub is_booked: bool,
    pub booking_id: Option<i64>,
}
