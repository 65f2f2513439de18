//! PostgreSQL Concert Adapter
//!
//! Implements `ConcertPort` on top of the concert, performer, user, booking,
//! and seat repositories.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresConcertAdapter;
//! use domain_concert::ConcertPort;
//! use std::sync::Arc;
//!
//! let port: Arc<dyn ConcertPort> = Arc::new(PostgresConcertAdapter::new(pool));
//! let concerts = port.list_concerts().await?;
//! ```

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{
    AdapterHealth, BookingId, ConcertId, DomainPort, HealthCheckResult, HealthCheckable,
    PerformerId, PortError, SeatId, UserId,
};
use domain_concert::{
    Booking, Concert, ConcertPort, Credentials, Genre, Performer, Seat, SeatStatus,
    SessionToken, User,
};

use crate::error::DatabaseError;
use crate::repositories::booking::BookingWithSeats;
use crate::repositories::concert::ConcertWithDetails;
use crate::repositories::performer::{Genre as DbGenre, PerformerRow};
use crate::repositories::seat::SeatRow;
use crate::repositories::user::UserRow;
use crate::repositories::{
    BookingRepository, ConcertRepository, PerformerRepository, SeatRepository, UserRepository,
};

const ADAPTER_ID: &str = "postgres-concert-adapter";

/// PostgreSQL-backed implementation of the ConcertPort trait
///
/// Every port call runs in its own transaction, committed before the call
/// returns. Database errors are translated to `PortError`:
/// - `DatabaseError::NotFound` -> `PortError::NotFound`
/// - connection and pool errors -> `PortError::Connection`
/// - anything else -> `PortError::Internal`
#[derive(Debug, Clone)]
pub struct PostgresConcertAdapter {
    concerts: ConcertRepository,
    performers: PerformerRepository,
    users: UserRepository,
    bookings: BookingRepository,
    seats: SeatRepository,
    pool: PgPool,
}

impl PostgresConcertAdapter {
    /// Creates a new PostgreSQL concert adapter
    pub fn new(pool: PgPool) -> Self {
        Self {
            concerts: ConcertRepository::new(pool.clone()),
            performers: PerformerRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            bookings: BookingRepository::new(pool.clone()),
            seats: SeatRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresConcertAdapter {}

#[async_trait]
impl HealthCheckable for PostgresConcertAdapter {
    /// Runs `SELECT 1` against the pool
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        let (status, message) = match result {
            Ok(_) => (AdapterHealth::Healthy, None),
            Err(e) => (AdapterHealth::Unhealthy, Some(format!("Database error: {}", e))),
        };

        HealthCheckResult {
            adapter_id: ADAPTER_ID.to_string(),
            status,
            latency_ms,
            message,
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl ConcertPort for PostgresConcertAdapter {
    #[instrument(skip(self), fields(concert_id = %id))]
    async fn get_concert(&self, id: ConcertId) -> Result<Concert, PortError> {
        debug!("Fetching concert by ID");

        self.concerts
            .get_by_id(id.value())
            .await
            .map_err(db_to_port_error)?
            .map(row_to_concert)
            .ok_or_else(|| PortError::not_found(ConcertId::entity(), id))
    }

    #[instrument(skip(self))]
    async fn list_concerts(&self) -> Result<Vec<Concert>, PortError> {
        let rows = self.concerts.list_all().await.map_err(db_to_port_error)?;
        debug!(count = rows.len(), "Listed concerts");
        Ok(rows.into_iter().map(row_to_concert).collect())
    }

    #[instrument(skip(self), fields(performer_id = %id))]
    async fn get_performer(&self, id: PerformerId) -> Result<Performer, PortError> {
        debug!("Fetching performer by ID");

        self.performers
            .get_by_id(id.value())
            .await
            .map_err(db_to_port_error)?
            .map(row_to_performer)
            .ok_or_else(|| PortError::not_found(PerformerId::entity(), id))
    }

    #[instrument(skip(self))]
    async fn list_performers(&self) -> Result<Vec<Performer>, PortError> {
        let rows = self.performers.list_all().await.map_err(db_to_port_error)?;
        debug!(count = rows.len(), "Listed performers");
        Ok(rows.into_iter().map(row_to_performer).collect())
    }

    #[instrument(skip(self, credentials, token), fields(username = %credentials.username))]
    async fn start_session(
        &self,
        credentials: &Credentials,
        token: &SessionToken,
    ) -> Result<User, PortError> {
        let row = self
            .users
            .rotate_session(&credentials.username, &credentials.password, token.as_str())
            .await
            .map_err(db_to_port_error)?
            .ok_or_else(|| PortError::unauthorized("invalid username or password"))?;

        debug!(user_id = row.id, "Session started");
        Ok(row_to_user(row))
    }

    #[instrument(skip(self, token))]
    async fn find_user_by_session(&self, token: &SessionToken) -> Result<User, PortError> {
        self.users
            .find_by_session_token(token.as_str())
            .await
            .map_err(db_to_port_error)?
            .map(row_to_user)
            .ok_or_else(|| PortError::unauthorized("unknown session token"))
    }

    #[instrument(skip(self))]
    async fn list_bookings_for_user(&self, user_id: UserId) -> Result<Vec<Booking>, PortError> {
        let rows = self
            .bookings
            .list_for_user(user_id.value())
            .await
            .map_err(db_to_port_error)?;
        debug!(count = rows.len(), "Listed bookings");
        Ok(rows.into_iter().map(row_to_booking).collect())
    }

    #[instrument(skip(self), fields(booking_id = %id))]
    async fn get_booking(&self, id: BookingId) -> Result<Booking, PortError> {
        self.bookings
            .get_by_id(id.value())
            .await
            .map_err(db_to_port_error)?
            .map(row_to_booking)
            .ok_or_else(|| PortError::not_found(BookingId::entity(), id))
    }

    #[instrument(skip(self))]
    async fn list_seats(
        &self,
        date: NaiveDateTime,
        status: SeatStatus,
    ) -> Result<Vec<Seat>, PortError> {
        let rows = self
            .seats
            .list_by_date(date, status.booked_flag())
            .await
            .map_err(db_to_port_error)?;
        debug!(count = rows.len(), "Listed seats");
        Ok(rows.into_iter().map(row_to_seat).collect())
    }
}

// ============================================================================
// Conversion Helpers
// ============================================================================

/// Converts a DatabaseError to a PortError
fn db_to_port_error(e: DatabaseError) -> PortError {
    if let DatabaseError::NotFound(message) = &e {
        return PortError::not_found("Record", message);
    }

    let message = e.to_string();
    if e.is_connection_error() {
        PortError::Connection { message, source: Some(Box::new(e)) }
    } else {
        PortError::Internal { message, source: Some(Box::new(e)) }
    }
}

fn row_to_concert(data: ConcertWithDetails) -> Concert {
    let ConcertWithDetails { concert, mut dates, performers } = data;
    dates.sort();
    dates.dedup();

    Concert {
        id: ConcertId::from(concert.id),
        name: concert.name,
        image_name: concert.image_name,
        blurb: concert.blurb,
        dates,
        performers: performers.into_iter().map(row_to_performer).collect(),
    }
}

fn row_to_performer(row: PerformerRow) -> Performer {
    Performer {
        id: PerformerId::from(row.id),
        name: row.name,
        image_name: row.image_name,
        genre: db_to_domain_genre(row.genre),
        blurb: row.blurb,
    }
}

fn row_to_user(row: UserRow) -> User {
    User {
        id: UserId::from(row.id),
        username: row.username,
        password: row.password,
        session_token: row.session_token.map(SessionToken::new),
    }
}

fn row_to_booking(data: BookingWithSeats) -> Booking {
    Booking {
        id: BookingId::from(data.booking.id),
        user_id: UserId::from(data.booking.user_id),
        concert_id: ConcertId::from(data.booking.concert_id),
        date: data.booking.date,
        seats: data.seats.into_iter().map(row_to_seat).collect(),
    }
}

fn row_to_seat(row: SeatRow) -> Seat {
    Seat {
        id: SeatId::from(row.id),
        label: row.label,
        date: row.date,
        price: row.price,
        is_booked: row.is_booked,
        booking_id: row.booking_id.map(BookingId::from),
    }
}

fn db_to_domain_genre(g: DbGenre) -> Genre {
    match g {
        DbGenre::Pop => Genre::Pop,
        DbGenre::HipHop => Genre::HipHop,
        DbGenre::RhythmAndBlues => Genre::RhythmAndBlues,
        DbGenre::Acappella => Genre::Acappella,
        DbGenre::Metal => Genre::Metal,
        DbGenre::Rock => Genre::Rock,
    }
}
