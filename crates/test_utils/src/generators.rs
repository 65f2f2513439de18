//! Property-Based Test Generators
//!
//! Proptest strategies producing values that satisfy the domain invariants:
//! positive ids, whole-minute concert times, and prices with two decimals.

use chrono::{NaiveDate, NaiveDateTime};
use core_kernel::{ConcertId, PerformerId, SeatId};
use domain_concert::{Concert, Genre, Performer, Seat, SeatStatus};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for positive row ids
pub fn id_strategy() -> impl Strategy<Value = i64> {
    1i64..1_000_000i64
}

/// Strategy for every genre
pub fn genre_strategy() -> impl Strategy<Value = Genre> {
    proptest::sample::select(Genre::ALL.to_vec())
}

/// Strategy for seat status filters
pub fn seat_status_strategy() -> impl Strategy<Value = SeatStatus> {
    prop_oneof![
        Just(SeatStatus::Booked),
        Just(SeatStatus::Unbooked),
        Just(SeatStatus::Any),
    ]
}

/// Strategy for concert date-times in 2024-2026, on the minute
pub fn concert_date_strategy() -> impl Strategy<Value = NaiveDateTime> {
    (0i64..3 * 365, 12u32..23, 0u32..60).prop_map(|(day, hour, minute)| {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
            + chrono::Duration::days(day)
    })
}

/// Strategy for ticket prices between 0.00 and 999.99
pub fn price_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..100_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for seat labels such as "C12"
pub fn seat_label_strategy() -> impl Strategy<Value = String> {
    ("[A-Z]", 1u32..40).prop_map(|(row, n)| format!("{row}{n}"))
}

/// Strategy for performers
pub fn performer_strategy() -> impl Strategy<Value = Performer> {
    (id_strategy(), "[A-Za-z][A-Za-z ]{0,30}", genre_strategy())
        .prop_map(|(id, name, genre)| Performer::new(PerformerId::new(id), name, genre))
}

/// Strategy for concerts with up to five dates and three performers
pub fn concert_strategy() -> impl Strategy<Value = Concert> {
    (
        id_strategy(),
        "[A-Za-z][A-Za-z ]{0,40}",
        prop::collection::vec(concert_date_strategy(), 0..5),
        prop::collection::vec(performer_strategy(), 0..3),
    )
        .prop_map(|(id, name, dates, performers)| {
            let concert = Concert::new(ConcertId::new(id), name);
            let concert = dates.into_iter().fold(concert, Concert::with_date);
            performers.into_iter().fold(concert, Concert::with_performer)
        })
}

/// Strategy for unbooked seats
pub fn seat_strategy() -> impl Strategy<Value = Seat> {
    (id_strategy(), seat_label_strategy(), concert_date_strategy(), price_strategy())
        .prop_map(|(id, label, date, price)| Seat::new(SeatId::new(id), label, date, price))
}
