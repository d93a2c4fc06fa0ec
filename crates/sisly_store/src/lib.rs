pub mod error;
pub mod reservations;
pub mod schema;

use diesel::r2d2::{ConnectionManager, Pool};
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
pub use error::Error;
use reservations::ReservationRepository;
use std::borrow::BorrowMut;

#[derive(serde::Deserialize, Debug)]
pub struct Config {
    pub url: String,
}

pub trait Update {
    fn has_updates(&self) -> Result<bool, Error>;
    fn update(&self) -> Result<(), Error>;
}

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();
type ConnectionType = SqliteConnection;
type ConnectionPool = Pool<ConnectionManager<ConnectionType>>;

#[derive(Clone)]
pub struct ReservationStore {
    pool: ConnectionPool,
}

impl ReservationStore {
    pub fn open<S: Into<String>>(store_url: S) -> Result<Self, Error> {
        let manager = ConnectionManager::<ConnectionType>::new(store_url);

        Ok(Self {
            pool: Pool::builder().build(manager)?,
        })
    }

    /// In-memory store for tests. Capped at a single pooled connection,
    /// otherwise every connection would see its own empty database.
    pub fn open_in_memory() -> Result<Self, Error> {
        let manager = ConnectionManager::<ConnectionType>::new(":memory:");

        Ok(Self {
            pool: Pool::builder().max_size(1).build(manager)?,
        })
    }

    pub fn reservations(&self) -> ReservationRepository {
        ReservationRepository::new(self.pool.clone())
    }
}

impl Update for ReservationStore {
    fn has_updates(&self) -> Result<bool, Error> {
        self.pool
            .get()?
            .borrow_mut()
            .has_pending_migration(MIGRATIONS)
            .map_err(|_| crate::Error::Update("failed to check pending migrations"))
    }

    fn update(&self) -> Result<(), Error> {
        self.pool
            .get()?
            .borrow_mut()
            .run_pending_migrations(MIGRATIONS)
            .map_err(|_| crate::Error::Update("failed to run pending migrations"))?;
        Ok(())
    }
}
