//! Infrastructure Database Layer
//!
//! PostgreSQL persistence for the concert service, built on SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern: repositories own the SQL and
//! return plain row types, and [`adapters::PostgresConcertAdapter`] turns
//! those rows into domain models behind the `ConcertPort` trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresConcertAdapter};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/concerts")).await?;
//! run_migrations(&pool).await?;
//! let adapter = PostgresConcertAdapter::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, run_migrations, DatabaseConfig, MIGRATOR};
pub use error::DatabaseError;
pub use adapters::PostgresConcertAdapter;
