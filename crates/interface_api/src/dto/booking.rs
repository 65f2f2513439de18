//! Booking and seat DTOs

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Booking request body
///
/// Accepted on `POST /bookings` but not persisted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub concert_id: i64,
    pub date: NaiveDateTime,
    #[serde(default)]
    pub seat_labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDto {
    pub id: i64,
    pub concert_id: i64,
    pub date: NaiveDateTime,
    pub seats: Vec<SeatDto>,
}

/// A seat label with its price; the price is serialized as a decimal string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatDto {
    pub label: String,
    pub price: Decimal,
}

/// Query string of `GET /seats/{date}`
#[derive(Debug, Default, Deserialize)]
pub struct SeatQuery {
    pub status: Option<String>,
}
