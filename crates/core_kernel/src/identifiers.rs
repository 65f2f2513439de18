//! Strongly-typed identifiers for persisted entities
//!
//! Every table keys its rows with a `BIGSERIAL`. Wrapping the raw `i64` in a
//! newtype per entity keeps a concert id from being passed where a performer
//! id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! define_id {
    ($name:ident, $entity:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw database key
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw database key
            pub const fn value(&self) -> i64 {
                self.0
            }

            /// Returns the entity name used in log and error messages
            pub fn entity() -> &'static str {
                $entity
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

define_id!(ConcertId, "Concert");
define_id!(PerformerId, "Performer");
define_id!(UserId, "User");
define_id!(BookingId, "Booking");
define_id!(SeatId, "Seat");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_raw_key() {
        assert_eq!(ConcertId::new(42).to_string(), "42");
    }

    #[test]
    fn test_parsing() {
        let parsed: PerformerId = " 7 ".parse().unwrap();
        assert_eq!(parsed, PerformerId::new(7));
        assert!("seven".parse::<PerformerId>().is_err());
    }

    #[test]
    fn test_i64_conversion() {
        let id = BookingId::from(99);
        let back: i64 = id.into();
        assert_eq!(back, 99);
    }
}
