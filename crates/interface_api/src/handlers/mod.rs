//! Request handlers, one module per resource

pub mod concerts;
pub mod performers;
pub mod auth;
pub mod bookings;
pub mod seats;
pub mod health;
