//! Request and response data transfer objects
//!
//! Field names are camelCase on the wire.

pub mod concert;
pub mod user;
pub mod booking;

pub use concert::{ConcertDto, ConcertSummaryDto, PerformerDto};
pub use user::{LoginRequest, UserDto};
pub use booking::{BookingDto, BookingRequest, SeatDto, SeatQuery};
