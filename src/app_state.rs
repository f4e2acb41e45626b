//! Implements a struct that holds the state of the REST server.

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use rusqlite::Connection;

use crate::{Error, db::initialize, pagination::PaginationConfig, seed::DEFAULT_SEED_URL};

/// How long to wait for the seed dataset before giving up.
const SEED_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the seed operation downloads sale records from.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    /// The URL of a JSON array of sale records.
    pub source_url: String,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SEED_URL.to_owned(),
        }
    }
}

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,

    /// The config for the seed operation.
    pub seed_config: SeedConfig,

    /// The HTTP client used to fetch the seed dataset.
    pub http_client: reqwest::Client,

    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized or the HTTP
    /// client cannot be built.
    pub fn new(
        db_connection: Connection,
        pagination_config: PaginationConfig,
        seed_config: SeedConfig,
    ) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let http_client = reqwest::Client::builder()
            .timeout(SEED_REQUEST_TIMEOUT)
            .build()
            .map_err(|error| Error::HttpClient(error.to_string()))?;

        Ok(Self {
            pagination_config,
            seed_config,
            http_client,
            db_connection: Arc::new(Mutex::new(db_connection)),
        })
    }
}

/// Acquire the database lock, logging the failure if the lock is poisoned.
///
/// # Errors
/// Returns [Error::DatabaseLockError] if the lock could not be acquired.
pub(crate) fn lock_connection(
    db_connection: &Mutex<Connection>,
) -> Result<MutexGuard<'_, Connection>, Error> {
    db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)
}
