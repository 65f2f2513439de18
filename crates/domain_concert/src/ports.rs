//! Concert Domain Ports
//!
//! `ConcertPort` is the data-access handle injected into every HTTP handler.
//! Each method is one unit of work: implementations open a transaction,
//! perform the lookup, and commit before returning.
//!
//! - **Internal Adapter**: PostgreSQL via `infra_db::adapters::PostgresConcertAdapter`
//! - **Mock Adapter**: in-memory [`mock::MockConcertPort`] for tests
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_concert::ConcertPort;
//! use std::sync::Arc;
//!
//! let port: Arc<dyn ConcertPort> = Arc::new(PostgresConcertAdapter::new(pool));
//! let concert = port.get_concert(ConcertId::new(1)).await?;
//! ```

use async_trait::async_trait;
use chrono::NaiveDateTime;

use core_kernel::{
    BookingId, ConcertId, DomainPort, HealthCheckable, PerformerId, PortError, UserId,
};

use crate::booking::{Booking, Seat, SeatStatus};
use crate::concert::Concert;
use crate::performer::Performer;
use crate::user::{Credentials, SessionToken, User};

/// Data access for the concert service
#[async_trait]
pub trait ConcertPort: DomainPort + HealthCheckable {
    /// Retrieves a concert with its dates and performers
    ///
    /// Returns `PortError::NotFound` if no concert has the id.
    async fn get_concert(&self, id: ConcertId) -> Result<Concert, PortError>;

    /// Retrieves every concert in store order
    async fn list_concerts(&self) -> Result<Vec<Concert>, PortError>;

    /// Retrieves a performer
    ///
    /// Returns `PortError::NotFound` if no performer has the id.
    async fn get_performer(&self, id: PerformerId) -> Result<Performer, PortError>;

    /// Retrieves every performer in store order
    async fn list_performers(&self) -> Result<Vec<Performer>, PortError>;

    /// Verifies credentials and, on success, stores `token` as the user's session
    ///
    /// Returns `PortError::Unauthorized` for an unknown username or a wrong
    /// password. The lookup, comparison, and token write share one transaction.
    async fn start_session(
        &self,
        credentials: &Credentials,
        token: &SessionToken,
    ) -> Result<User, PortError>;

    /// Resolves the user holding `token`
    ///
    /// Returns `PortError::Unauthorized` if no user holds it.
    async fn find_user_by_session(&self, token: &SessionToken) -> Result<User, PortError>;

    /// Retrieves all bookings owned by a user, with their seats
    async fn list_bookings_for_user(&self, user_id: UserId) -> Result<Vec<Booking>, PortError>;

    /// Retrieves one booking with its seats
    ///
    /// Returns `PortError::NotFound` if no booking has the id.
    async fn get_booking(&self, id: BookingId) -> Result<Booking, PortError>;

    /// Retrieves the seats for a concert date that pass `status`
    async fn list_seats(
        &self,
        date: NaiveDateTime,
        status: SeatStatus,
    ) -> Result<Vec<Seat>, PortError>;
}

/// Mock implementation of ConcertPort for testing
///
/// Stores everything in memory, keyed by id so listings come back in id order
/// the way a table scan on a fresh database would.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use chrono::Utc;
    use core_kernel::{AdapterHealth, HealthCheckResult};
    use tracing::debug;

    /// In-memory mock implementation of ConcertPort
    #[derive(Debug, Default, Clone)]
    pub struct MockConcertPort {
        concerts: Arc<RwLock<BTreeMap<ConcertId, Concert>>>,
        performers: Arc<RwLock<BTreeMap<PerformerId, Performer>>>,
        users: Arc<RwLock<BTreeMap<UserId, User>>>,
        bookings: Arc<RwLock<BTreeMap<BookingId, Booking>>>,
        seats: Arc<RwLock<Vec<Seat>>>,
    }

    impl MockConcertPort {
        /// Creates an empty mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Stores a concert and its performers
        pub async fn insert_concert(&self, concert: Concert) {
            {
                let mut performers = self.performers.write().await;
                for performer in &concert.performers {
                    performers.insert(performer.id, performer.clone());
                }
            }
            self.concerts.write().await.insert(concert.id, concert);
        }

        /// Stores a performer
        pub async fn insert_performer(&self, performer: Performer) {
            self.performers.write().await.insert(performer.id, performer);
        }

        /// Stores a user
        pub async fn insert_user(&self, user: User) {
            self.users.write().await.insert(user.id, user);
        }

        /// Stores a booking and marks its seats as held by it
        pub async fn insert_booking(&self, mut booking: Booking) {
            let booking_id = booking.id;
            booking.seats = booking
                .seats
                .into_iter()
                .map(|seat| seat.booked_by(booking_id))
                .collect();
            {
                let mut seats = self.seats.write().await;
                for seat in &booking.seats {
                    seats.retain(|existing| existing.id != seat.id);
                    seats.push(seat.clone());
                }
            }
            self.bookings.write().await.insert(booking_id, booking);
        }

        /// Stores an unbooked seat
        pub async fn insert_seat(&self, seat: Seat) {
            self.seats.write().await.push(seat);
        }

        /// Number of stored bookings
        pub async fn booking_count(&self) -> usize {
            self.bookings.read().await.len()
        }

        /// Returns a stored user
        pub async fn user(&self, id: UserId) -> Option<User> {
            self.users.read().await.get(&id).cloned()
        }
    }

    impl DomainPort for MockConcertPort {}

    #[async_trait]
    impl HealthCheckable for MockConcertPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult {
                adapter_id: "mock-concert-port".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms: 0,
                message: Some("Mock adapter always healthy".to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl ConcertPort for MockConcertPort {
        async fn get_concert(&self, id: ConcertId) -> Result<Concert, PortError> {
            self.concerts
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found(ConcertId::entity(), id))
        }

        async fn list_concerts(&self) -> Result<Vec<Concert>, PortError> {
            Ok(self.concerts.read().await.values().cloned().collect())
        }

        async fn get_performer(&self, id: PerformerId) -> Result<Performer, PortError> {
            self.performers
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found(PerformerId::entity(), id))
        }

        async fn list_performers(&self) -> Result<Vec<Performer>, PortError> {
            Ok(self.performers.read().await.values().cloned().collect())
        }

        async fn start_session(
            &self,
            credentials: &Credentials,
            token: &SessionToken,
        ) -> Result<User, PortError> {
            let mut users = self.users.write().await;
            let user = users
                .values_mut()
                .find(|user| user.username == credentials.username)
                .ok_or_else(|| PortError::unauthorized("unknown username"))?;

            if !user.password_matches(&credentials.password) {
                return Err(PortError::unauthorized("password mismatch"));
            }

            user.start_session(token.clone());
            debug!(user_id = %user.id, "Session started");
            Ok(user.clone())
        }

        async fn find_user_by_session(&self, token: &SessionToken) -> Result<User, PortError> {
            self.users
                .read()
                .await
                .values()
                .find(|user| user.holds_session(token))
                .cloned()
                .ok_or_else(|| PortError::unauthorized("unknown session token"))
        }

        async fn list_bookings_for_user(&self, user_id: UserId) -> Result<Vec<Booking>, PortError> {
            Ok(self
                .bookings
                .read()
                .await
                .values()
                .filter(|booking| booking.belongs_to(user_id))
                .cloned()
                .collect())
        }

        async fn get_booking(&self, id: BookingId) -> Result<Booking, PortError> {
            self.bookings
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found(BookingId::entity(), id))
        }

        async fn list_seats(
            &self,
            date: NaiveDateTime,
            status: SeatStatus,
        ) -> Result<Vec<Seat>, PortError> {
            let mut seats: Vec<Seat> = self
                .seats
                .read()
                .await
                .iter()
                .filter(|seat| seat.date == date && status.matches(seat))
                .cloned()
                .collect();
            seats.sort_by(|a, b| a.label.cmp(&b.label));
            Ok(seats)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::mock::MockConcertPort;
    use chrono::NaiveDate;
    use core_kernel::SeatId;
    use rust_decimal_macros::dec;

    use crate::performer::Genre;

    fn evening() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 2)
            .unwrap()
            .and_hms_opt(20, 0, 0)
            .unwrap()
    }

    async fn port_with_user() -> MockConcertPort {
        let port = MockConcertPort::new();
        port.insert_user(User::new(UserId::new(1), "testuser", "pa55word")).await;
        port
    }

    #[tokio::test]
    async fn test_mock_port_get_concert() {
        let port = MockConcertPort::new();
        let performer = Performer::new(PerformerId::new(3), "Cubanos", Genre::Pop);
        port.insert_concert(
            Concert::new(ConcertId::new(1), "Jazz Night").with_performer(performer),
        )
        .await;

        let concert = port.get_concert(ConcertId::new(1)).await.unwrap();
        assert_eq!(concert.name, "Jazz Night");

        // Performers of inserted concerts are listed too
        assert_eq!(port.list_performers().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_mock_port_not_found() {
        let port = MockConcertPort::new();
        let result = port.get_concert(ConcertId::new(2)).await;
        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_mock_port_start_session() {
        let port = port_with_user().await;
        let token = SessionToken::generate();

        let user = port
            .start_session(&Credentials::new("testuser", "pa55word"), &token)
            .await
            .unwrap();
        assert_eq!(user.session_token.as_ref(), Some(&token));

        let resolved = port.find_user_by_session(&token).await.unwrap();
        assert_eq!(resolved.id, UserId::new(1));
    }

    #[tokio::test]
    async fn test_mock_port_rejects_bad_credentials() {
        let port = port_with_user().await;
        let token = SessionToken::generate();

        let wrong_password = port
            .start_session(&Credentials::new("testuser", "nope"), &token)
            .await;
        assert!(wrong_password.unwrap_err().is_unauthorized());

        let unknown_user = port
            .start_session(&Credentials::new("nobody", "pa55word"), &token)
            .await;
        assert!(unknown_user.unwrap_err().is_unauthorized());

        assert!(port.find_user_by_session(&token).await.is_err());
    }

    #[tokio::test]
    async fn test_mock_port_seat_filter() {
        let port = MockConcertPort::new();
        port.insert_seat(Seat::new(SeatId::new(2), "A2", evening(), dec!(80))).await;
        port.insert_seat(Seat::new(SeatId::new(1), "A1", evening(), dec!(80))).await;
        port.insert_booking(Booking {
            id: BookingId::new(1),
            user_id: UserId::new(1),
            concert_id: ConcertId::new(1),
            date: evening(),
            seats: vec![Seat::new(SeatId::new(1), "A1", evening(), dec!(80))],
        })
        .await;

        let all = port.list_seats(evening(), SeatStatus::Any).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].label, "A1");

        let free = port.list_seats(evening(), SeatStatus::Unbooked).await.unwrap();
        assert_eq!(free.len(), 1);
        assert_eq!(free[0].label, "A2");
    }

    #[tokio::test]
    async fn test_mock_port_booking_holds_its_seats() {
        let port = MockConcertPort::new();
        port.insert_booking(Booking {
            id: BookingId::new(4),
            user_id: UserId::new(1),
            concert_id: ConcertId::new(1),
            date: evening(),
            seats: vec![Seat::new(SeatId::new(9), "B3", evening(), dec!(42.00))],
        })
        .await;

        let booking = port.get_booking(BookingId::new(4)).await.unwrap();

        assert!(booking.seats[0].is_booked);
        assert_eq!(booking.seats[0].booking_id, Some(BookingId::new(4)));
    }
}
