//! Database Test Utilities
//!
//! Starts PostgreSQL in a container, applies the embedded migrations, and
//! seeds the fixture catalogue. Requires Docker; suites using it are marked
//! `#[ignore]`.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::postgres::Postgres;

use crate::fixtures::{BookingFixtures, ConcertFixtures, SeatFixtures, UserFixtures};

const POSTGRES_USER: &str = "postgres";
const POSTGRES_PASSWORD: &str = "postgres";
const POSTGRES_DB: &str = "postgres";

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Connection settings of a test database
#[derive(Debug, Clone)]
pub struct TestDatabaseConfig {
    pub user: String,
    pub password: String,
    pub database: String,
    pub host: String,
    pub port: u16,
}

impl Default for TestDatabaseConfig {
    fn default() -> Self {
        Self {
            user: POSTGRES_USER.to_string(),
            password: POSTGRES_PASSWORD.to_string(),
            database: POSTGRES_DB.to_string(),
            host: "localhost".to_string(),
            port: 5432,
        }
    }
}

impl TestDatabaseConfig {
    /// Creates the database connection URL
    pub fn connection_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.database
        )
    }
}

/// A migrated PostgreSQL test container
pub struct TestDatabase {
    _container: ContainerAsync<Postgres>,
    pub config: TestDatabaseConfig,
    pub pool: PgPool,
}

impl TestDatabase {
    /// Starts a new PostgreSQL container with the schema applied
    pub async fn new() -> Result<Self, BoxError> {
        let container = Postgres::default().start().await?;

        let config = TestDatabaseConfig {
            host: container.get_host().await?.to_string(),
            port: container.get_host_port_ipv4(5432).await?,
            ..TestDatabaseConfig::default()
        };

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect(&config.connection_url())
            .await?;

        infra_db::run_migrations(&pool).await?;

        Ok(Self {
            _container: container,
            config,
            pool,
        })
    }

    /// Returns a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Clears all data from the database while preserving the schema
    pub async fn clear_data(&self) -> Result<(), BoxError> {
        sqlx::query(
            "TRUNCATE TABLE seats, bookings, users, concert_performers, concert_dates, \
             concerts, performers RESTART IDENTITY CASCADE",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Inserts the fixture catalogue with the fixture ids
    pub async fn seed_fixtures(&self) -> Result<(), BoxError> {
        seed_fixtures(&self.pool).await
    }
}

/// Inserts the fixture catalogue into `pool`
///
/// Seats are stored booked or unbooked exactly as the fixture bookings say.
pub async fn seed_fixtures(pool: &PgPool) -> Result<(), BoxError> {
    let mut tx = pool.begin().await?;

    for concert in ConcertFixtures::all() {
        for performer in &concert.performers {
            sqlx::query(
                "INSERT INTO performers (id, name, image_name, genre, blurb) \
                 VALUES ($1, $2, $3, $4::genre, $5) ON CONFLICT (id) DO NOTHING",
            )
            .bind(performer.id.value())
            .bind(&performer.name)
            .bind(&performer.image_name)
            .bind(genre_label(performer.genre))
            .bind(&performer.blurb)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query("INSERT INTO concerts (id, name, image_name, blurb) VALUES ($1, $2, $3, $4)")
            .bind(concert.id.value())
            .bind(&concert.name)
            .bind(&concert.image_name)
            .bind(&concert.blurb)
            .execute(&mut *tx)
            .await?;

        for date in &concert.dates {
            sqlx::query("INSERT INTO concert_dates (concert_id, date) VALUES ($1, $2)")
                .bind(concert.id.value())
                .bind(date)
                .execute(&mut *tx)
                .await?;
        }

        for performer in &concert.performers {
            sqlx::query("INSERT INTO concert_performers (concert_id, performer_id) VALUES ($1, $2)")
                .bind(concert.id.value())
                .bind(performer.id.value())
                .execute(&mut *tx)
                .await?;
        }
    }

    for user in UserFixtures::all() {
        sqlx::query("INSERT INTO users (id, username, password) VALUES ($1, $2, $3)")
            .bind(user.id.value())
            .bind(&user.username)
            .bind(&user.password)
            .execute(&mut *tx)
            .await?;
    }

    for booking in BookingFixtures::all() {
        sqlx::query("INSERT INTO bookings (id, user_id, concert_id, date) VALUES ($1, $2, $3, $4)")
            .bind(booking.id.value())
            .bind(booking.user_id.value())
            .bind(booking.concert_id.value())
            .bind(booking.date)
            .execute(&mut *tx)
            .await?;
    }

    let bookings = BookingFixtures::all();
    for seat in SeatFixtures::opening_night() {
        let holder = bookings
            .iter()
            .find(|b| b.seats.iter().any(|s| s.id == seat.id))
            .map(|b| b.id.value());

        sqlx::query(
            "INSERT INTO seats (id, label, date, price, is_booked, booking_id) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(seat.id.value())
        .bind(&seat.label)
        .bind(seat.date)
        .bind(seat.price)
        .bind(holder.is_some())
        .bind(holder)
        .execute(&mut *tx)
        .await?;
    }

    // Explicit ids bypass the sequences; move them past the fixtures.
    for table in ["performers", "concerts", "users", "bookings", "seats"] {
        sqlx::query(&format!(
            "SELECT setval(pg_get_serial_sequence('{table}', 'id'), (SELECT MAX(id) FROM {table}))"
        ))
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}

fn genre_label(genre: domain_concert::Genre) -> &'static str {
    use domain_concert::Genre;
    match genre {
        Genre::Pop => "pop",
        Genre::HipHop => "hip_hop",
        Genre::RhythmAndBlues => "rhythm_and_blues",
        Genre::Acappella => "acappella",
        Genre::Metal => "metal",
        Genre::Rock => "rock",
    }
}

/// Creates an isolated, unseeded test database for a single test
pub async fn create_isolated_test_database() -> Result<TestDatabase, BoxError> {
    TestDatabase::new().await
}
