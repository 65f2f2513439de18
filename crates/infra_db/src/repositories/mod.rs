//! Repository implementations for the concert service tables
//!
//! Each public repository method is one unit of work: it begins a
//! transaction on the pool, runs its queries, and commits. Rows are decoded
//! with `sqlx::FromRow` and converted to domain types by the adapter layer.

pub mod concert;
pub mod performer;
pub mod user;
pub mod booking;
pub mod seat;

pub use concert::ConcertRepository;
pub use performer::PerformerRepository;
pub use user::UserRepository;
pub use booking::BookingRepository;
pub use seat::SeatRepository;

use sqlx::{PgPool, Postgres, Transaction};

use crate::error::DatabaseError;

pub(crate) async fn begin(pool: &PgPool) -> Result<Transaction<'static, Postgres>, DatabaseError> {
    pool.begin()
        .await
        .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))
}

pub(crate) async fn commit(tx: Transaction<'static, Postgres>) -> Result<(), DatabaseError> {
    tx.commit()
        .await
        .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))
}
