//! Pre-built Test Fixtures
//!
//! A small, fixed catalogue shared by the mock-port and database suites so
//! both see the same ids, names, and prices.
//!
//! | id | concert       | performers          | dates                    |
//! |----|---------------|---------------------|--------------------------|
//! | 1  | Jazz Night    | Blue Notes          | opening, closing night   |
//! | 2  | Rock Festival | Iron Echo, Pop Idol | closing night            |
//!
//! `testuser` (id 1) owns booking 1; `otheruser` (id 2) owns booking 2.

use chrono::{NaiveDate, NaiveDateTime};
use core_kernel::{BookingId, ConcertId, PerformerId, SeatId, UserId};
use domain_concert::{Booking, Concert, Genre, MockConcertPort, Performer, Seat, User};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

static OPENING_NIGHT: Lazy<NaiveDateTime> = Lazy::new(|| {
    NaiveDate::from_ymd_opt(2024, 3, 2)
        .unwrap()
        .and_hms_opt(20, 0, 0)
        .unwrap()
});

static CLOSING_NIGHT: Lazy<NaiveDateTime> = Lazy::new(|| {
    NaiveDate::from_ymd_opt(2024, 3, 9)
        .unwrap()
        .and_hms_opt(19, 30, 0)
        .unwrap()
});

/// Fixture for concert dates
pub struct DateFixtures;

impl DateFixtures {
    /// 2024-03-02 20:00
    pub fn opening_night() -> NaiveDateTime {
        *OPENING_NIGHT
    }

    /// 2024-03-09 19:30
    pub fn closing_night() -> NaiveDateTime {
        *CLOSING_NIGHT
    }

    /// A date with no concert or seats
    pub fn unscheduled() -> NaiveDateTime {
        *OPENING_NIGHT - chrono::Duration::days(30)
    }
}

/// Fixture for performers
pub struct PerformerFixtures;

impl PerformerFixtures {
    pub fn blue_notes() -> Performer {
        Performer::new(PerformerId::new(1), "Blue Notes", Genre::RhythmAndBlues)
            .with_image("blue_notes.jpg")
            .with_blurb("A five-piece rhythm and blues outfit.")
    }

    pub fn iron_echo() -> Performer {
        Performer::new(PerformerId::new(2), "Iron Echo", Genre::Metal)
            .with_image("iron_echo.jpg")
    }

    pub fn pop_idol() -> Performer {
        Performer::new(PerformerId::new(3), "Pop Idol", Genre::Pop)
    }

    /// Every fixture performer, in id order
    pub fn all() -> Vec<Performer> {
        vec![Self::blue_notes(), Self::iron_echo(), Self::pop_idol()]
    }
}

/// Fixture for concerts
pub struct ConcertFixtures;

impl ConcertFixtures {
    /// Concert 1, "Jazz Night"
    pub fn jazz_night() -> Concert {
        Concert::new(ConcertId::new(1), "Jazz Night")
            .with_image("jazz_night.jpg")
            .with_blurb("An evening of smooth grooves.")
            .with_date(DateFixtures::opening_night())
            .with_date(DateFixtures::closing_night())
            .with_performer(PerformerFixtures::blue_notes())
    }

    /// Concert 2, "Rock Festival"
    pub fn rock_festival() -> Concert {
        Concert::new(ConcertId::new(2), "Rock Festival")
            .with_date(DateFixtures::closing_night())
            .with_performer(PerformerFixtures::iron_echo())
            .with_performer(PerformerFixtures::pop_idol())
    }

    /// Every fixture concert, in id order
    pub fn all() -> Vec<Concert> {
        vec![Self::jazz_night(), Self::rock_festival()]
    }

    /// An id no fixture concert uses
    pub fn missing_id() -> ConcertId {
        ConcertId::new(999)
    }
}

/// Fixture for users
pub struct UserFixtures;

impl UserFixtures {
    pub const PASSWORD: &'static str = "pa55word";

    /// User 1, `testuser`
    pub fn testuser() -> User {
        User::new(UserId::new(1), "testuser", Self::PASSWORD)
    }

    /// User 2, `otheruser`
    pub fn otheruser() -> User {
        User::new(UserId::new(2), "otheruser", "s3cret")
    }

    pub fn all() -> Vec<User> {
        vec![Self::testuser(), Self::otheruser()]
    }
}

/// Fixture for seats and prices
pub struct SeatFixtures;

impl SeatFixtures {
    /// Price of every fixture seat
    pub fn standard_price() -> Decimal {
        dec!(85.50)
    }

    /// Seats A1 to A4 for opening night, all unbooked
    pub fn opening_night() -> Vec<Seat> {
        (1..=4)
            .map(|n| {
                Seat::new(
                    SeatId::new(n),
                    format!("A{n}"),
                    DateFixtures::opening_night(),
                    Self::standard_price(),
                )
            })
            .collect()
    }
}

/// Fixture for bookings
pub struct BookingFixtures;

impl BookingFixtures {
    /// Booking 1: `testuser` holds A1 and A2 on opening night
    pub fn testuser_booking() -> Booking {
        let seats = SeatFixtures::opening_night();
        Booking {
            id: BookingId::new(1),
            user_id: UserId::new(1),
            concert_id: ConcertId::new(1),
            date: DateFixtures::opening_night(),
            seats: seats[..2]
                .iter()
                .cloned()
                .map(|seat| seat.booked_by(BookingId::new(1)))
                .collect(),
        }
    }

    /// Booking 2: `otheruser` holds A3 on opening night
    pub fn otheruser_booking() -> Booking {
        let seats = SeatFixtures::opening_night();
        Booking {
            id: BookingId::new(2),
            user_id: UserId::new(2),
            concert_id: ConcertId::new(1),
            date: DateFixtures::opening_night(),
            seats: vec![seats[2].clone().booked_by(BookingId::new(2))],
        }
    }

    pub fn all() -> Vec<Booking> {
        vec![Self::testuser_booking(), Self::otheruser_booking()]
    }
}

/// Builds a mock port holding the whole fixture catalogue
///
/// Seat A4 stays unbooked.
pub async fn seeded_mock_port() -> MockConcertPort {
    let port = MockConcertPort::new();

    for concert in ConcertFixtures::all() {
        port.insert_concert(concert).await;
    }
    for user in UserFixtures::all() {
        port.insert_user(user).await;
    }
    for seat in SeatFixtures::opening_night() {
        port.insert_seat(seat).await;
    }
    for booking in BookingFixtures::all() {
        port.insert_booking(booking).await;
    }

    port
}
