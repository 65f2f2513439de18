//! Bookings and seats

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use core_kernel::{BookingId, ConcertId, CoreError, SeatId, UserId};

/// A priced seat for one concert date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    /// Unique identifier
    pub id: SeatId,
    /// Row and number, e.g. "A4"
    pub label: String,
    /// Concert date the seat belongs to
    pub date: NaiveDateTime,
    /// Ticket price
    pub price: Decimal,
    /// Whether a booking holds the seat
    pub is_booked: bool,
    /// The booking holding the seat
    pub booking_id: Option<BookingId>,
}

impl Seat {
    /// Creates an unbooked seat
    pub fn new(id: SeatId, label: impl Into<String>, date: NaiveDateTime, price: Decimal) -> Self {
        Self {
            id,
            label: label.into(),
            date,
            price,
            is_booked: false,
            booking_id: None,
        }
    }

    /// Marks the seat as held by `booking_id`
    pub fn booked_by(mut self, booking_id: BookingId) -> Self {
        self.is_booked = true;
        self.booking_id = Some(booking_id);
        self
    }
}

/// Seat filter for availability queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SeatStatus {
    Booked,
    Unbooked,
    #[default]
    Any,
}

impl SeatStatus {
    /// Checks whether a seat passes this filter
    pub fn matches(&self, seat: &Seat) -> bool {
        match self {
            SeatStatus::Booked => seat.is_booked,
            SeatStatus::Unbooked => !seat.is_booked,
            SeatStatus::Any => true,
        }
    }

    /// The booked flag to filter on, or `None` for no filter
    pub fn booked_flag(&self) -> Option<bool> {
        match self {
            SeatStatus::Booked => Some(true),
            SeatStatus::Unbooked => Some(false),
            SeatStatus::Any => None,
        }
    }
}

impl FromStr for SeatStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "booked" => Ok(SeatStatus::Booked),
            "unbooked" => Ok(SeatStatus::Unbooked),
            "any" => Ok(SeatStatus::Any),
            other => Err(CoreError::validation(format!("unknown seat status '{other}'"))),
        }
    }
}

/// A user's reservation of seats on one concert date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// Unique identifier
    pub id: BookingId,
    /// Owner
    pub user_id: UserId,
    /// Booked concert
    pub concert_id: ConcertId,
    /// Booked concert date
    pub date: NaiveDateTime,
    /// Seats held by the booking
    pub seats: Vec<Seat>,
}

impl Booking {
    /// Checks whether the booking belongs to `user_id`
    pub fn belongs_to(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}
