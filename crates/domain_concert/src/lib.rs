//! Concert Domain
//!
//! The records the concert service exposes and the port through which
//! handlers reach them.
//!
//! # Key Concepts
//!
//! - **Concert**: a named event with one or more scheduled dates and a line-up
//! - **Performer**: an act appearing in concerts
//! - **User**: an account holding at most one active session token
//! - **Booking**: a user's reservation of seats on one concert date
//! - **Seat**: a priced place for a specific concert date
//!
//! Entities carry no persistence concerns; adapters in `infra_db` load them
//! and the API layer maps them to transfer objects.

pub mod concert;
pub mod performer;
pub mod user;
pub mod booking;
pub mod ports;

pub use concert::Concert;
pub use performer::{Performer, Genre};
pub use user::{User, Credentials, SessionToken};
pub use booking::{Booking, Seat, SeatStatus};
pub use ports::ConcertPort;
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockConcertPort;
