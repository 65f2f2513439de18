//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! concert service test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built concerts, performers, users, bookings, and seats
//! - `builders`: Builder patterns for test data construction
//! - `database`: PostgreSQL test containers and seed data
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use generators::*;
