//! Domain Adapters
//!
//! Adapter implementations connecting domain ports to the PostgreSQL
//! repositories. Each adapter implements the port trait, translates rows into
//! domain models, and maps `DatabaseError` onto `PortError`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresConcertAdapter;
//! use domain_concert::ConcertPort;
//!
//! let adapter = PostgresConcertAdapter::new(pool);
//! let concert = adapter.get_concert(ConcertId::new(1)).await?;
//! ```

pub mod concert;

pub use concert::PostgresConcertAdapter;
