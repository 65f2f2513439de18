//! Core Kernel - Foundational types shared by the concert service
//!
//! This crate provides the building blocks used by every other crate:
//! - Strongly-typed numeric identifiers for persisted entities
//! - The port error type and health-check abstractions for data-access adapters
//! - The kernel error type

pub mod identifiers;
pub mod ports;
pub mod error;

pub use identifiers::{ConcertId, PerformerId, UserId, BookingId, SeatId};
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
};
pub use error::CoreError;
