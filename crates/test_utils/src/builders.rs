//! Test Data Builders
//!
//! Builders for constructing test data with sensible defaults, so tests set
//! only the fields they care about. Names default to random `fake` values.

use chrono::NaiveDateTime;
use core_kernel::{BookingId, ConcertId, PerformerId, SeatId, UserId};
use domain_concert::{Booking, Genre, Performer, Seat};
use fake::faker::name::en::Name;
use fake::Fake;
use rust_decimal::Decimal;

use crate::fixtures::{DateFixtures, SeatFixtures};

/// Builder for performers
pub struct TestPerformerBuilder {
    id: PerformerId,
    name: String,
    genre: Genre,
}

impl TestPerformerBuilder {
    pub fn new(id: i64) -> Self {
        Self {
            id: PerformerId::new(id),
            name: Name().fake(),
            genre: Genre::Pop,
        }
    }

    pub fn with_genre(mut self, genre: Genre) -> Self {
        self.genre = genre;
        self
    }

    pub fn build(self) -> Performer {
        Performer::new(self.id, self.name, self.genre)
    }
}

/// Builder for bookings with generated seats
pub struct TestBookingBuilder {
    id: BookingId,
    user_id: UserId,
    concert_id: ConcertId,
    date: NaiveDateTime,
    seat_labels: Vec<String>,
    price: Decimal,
}

impl TestBookingBuilder {
    pub fn new(id: i64, user_id: i64) -> Self {
        Self {
            id: BookingId::new(id),
            user_id: UserId::new(user_id),
            concert_id: ConcertId::new(1),
            date: DateFixtures::opening_night(),
            seat_labels: vec!["B1".to_string()],
            price: SeatFixtures::standard_price(),
        }
    }

    pub fn for_concert(mut self, concert_id: i64, date: NaiveDateTime) -> Self {
        self.concert_id = ConcertId::new(concert_id);
        self.date = date;
        self
    }

    pub fn with_seats(mut self, labels: &[&str]) -> Self {
        self.seat_labels = labels.iter().map(|l| l.to_string()).collect();
        self
    }

    /// Builds the booking; seat ids are derived from the booking id so
    /// separate bookings never share a seat
    pub fn build(self) -> Booking {
        let seats = self
            .seat_labels
            .into_iter()
            .enumerate()
            .map(|(i, label)| {
                Seat::new(SeatId::new(self.id.value() * 1000 + i as i64), label, self.date, self.price)
                    .booked_by(self.id)
            })
            .collect();

        Booking {
            id: self.id,
            user_id: self.user_id,
            concert_id: self.concert_id,
            date: self.date,
            seats,
        }
    }
}
