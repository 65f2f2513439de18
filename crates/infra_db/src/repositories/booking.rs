//! Booking repository implementation

use chrono::NaiveDateTime;
use sqlx::{PgPool, Postgres, Transaction};
use std::collections::HashMap;

use crate::error::DatabaseError;
use super::{begin, commit};
use super::seat::SeatRow;

/// Repository for bookings and the seats they hold
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    /// Creates a new BookingRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves a booking with its seats
    pub async fn get_by_id(&self, booking_id: i64) -> Result<Option<BookingWithSeats>, DatabaseError> {
        let mut tx = begin(&self.pool).await?;

        let booking = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT id, user_id, concert_id, date
            FROM bookings
            WHERE id = $1
            "#,
        )
        .bind(booking_id)
        .fetch_optional(&mut *tx)
        .await?;

        let result = match booking {
            Some(booking) => attach_seats(&mut tx, vec![booking]).await?.pop(),
            None => None,
        };

        commit(tx).await?;
        Ok(result)
    }

    /// Retrieves every booking owned by a user, in key order
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<BookingWithSeats>, DatabaseError> {
        let mut tx = begin(&self.pool).await?;

        let bookings = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT id, user_id, concert_id, date
            FROM bookings
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&mut *tx)
        .await?;

        let result = attach_seats(&mut tx, bookings).await?;

        commit(tx).await?;
        Ok(result)
    }
}

async fn attach_seats(
    tx: &mut Transaction<'static, Postgres>,
    bookings: Vec<BookingRow>,
) -> Result<Vec<BookingWithSeats>, DatabaseError> {
    if bookings.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i64> = bookings.iter().map(|b| b.id).collect();
    let seats = sqlx::query_as::<_, SeatRow>(
        r#"
        SELECT id, label, date, price, is_booked, booking_id
        FROM seats
        WHERE booking_id = ANY($1)
        ORDER BY label
        "#,
    )
    .bind(&ids)
    .fetch_all(&mut **tx)
    .await?;

    Ok(group_seats(bookings, seats))
}

fn group_seats(bookings: Vec<BookingRow>, seats: Vec<SeatRow>) -> Vec<BookingWithSeats> {
    let mut seats_by_booking: HashMap<i64, Vec<SeatRow>> = HashMap::new();
    for seat in seats {
        if let Some(booking_id) = seat.booking_id {
            seats_by_booking.entry(booking_id).or_default().push(seat);
        }
    }

    bookings
        .into_iter()
        .map(|booking| BookingWithSeats {
            seats: seats_by_booking.remove(&booking.id).unwrap_or_default(),
            booking,
        })
        .collect()
}

/// Database row for a booking
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BookingRow {
    pub id: i64,
    pub user_id: i64,
    pub concert_id: i64,
    pub date: NaiveDateTime,
}

/// A booking row with the seats it holds
#[derive(Debug, Clone)]
pub struct BookingWithSeats {
    pub booking: BookingRow,
    pub seats: Vec<SeatRow>,
}
