//! Replaces the stored sale records with a dataset downloaded over HTTP.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::{Connection, Transaction as SqlTransaction};
use serde::Deserialize;
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    app_state::{SeedConfig, lock_connection},
    sale::{SaleRecord, count_sale_records, create_sale_record},
};

/// The dataset the seed operation downloads when no other source is configured.
pub const DEFAULT_SEED_URL: &str = "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

/// A sale record as it appears in the seed dataset.
///
/// Fields other than those below, such as the source's own `id` and `image`,
/// are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedRecord {
    /// The name of the item.
    pub title: String,
    /// The asking price of the item.
    pub price: f64,
    /// A longer text description of the item.
    #[serde(default)]
    pub description: String,
    /// The category label.
    #[serde(default)]
    pub category: String,
    /// When the item was sold or listed.
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
    /// Whether the item sold.
    #[serde(default)]
    pub sold: bool,
}

/// The state needed to seed the database.
#[derive(Debug, Clone)]
pub struct SeedState {
    /// The database connection for replacing sale records.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The client used to download the dataset.
    pub http_client: reqwest::Client,
    /// Where to download the dataset from.
    pub seed_config: SeedConfig,
}

impl FromRef<AppState> for SeedState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            http_client: state.http_client.clone(),
            seed_config: state.seed_config.clone(),
        }
    }
}

/// Download the seed dataset from `url`.
///
/// # Errors
/// Returns [Error::SeedFetch] if the request fails, the server responds with
/// an error status, or the body is not a JSON array of sale records.
pub async fn fetch_seed_records(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<SeedRecord>, Error> {
    let response = client
        .get(url)
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|error| Error::SeedFetch(error.to_string()))?;

    response
        .json::<Vec<SeedRecord>>()
        .await
        .map_err(|error| Error::SeedFetch(error.to_string()))
}

/// Delete every stored sale record and insert `records` in their place.
///
/// The delete and the inserts happen in one transaction, so on error the
/// previously stored records are kept.
///
/// # Errors
/// Returns [Error::InvalidSeedRecord] if a record has a price that is not a
/// finite number, or [Error::SqlError] if there is an SQL error.
pub fn replace_sale_records(records: Vec<SeedRecord>, connection: &Connection) -> Result<u64, Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Immediate)?;

    transaction.execute("DELETE FROM sale", ())?;

    let mut inserted = 0;
    for record in records {
        if !record.price.is_finite() {
            return Err(Error::InvalidSeedRecord(format!(
                "\"{}\" has a price of {}",
                record.title, record.price
            )));
        }

        let builder = SaleRecord::build(&record.title, record.price, record.date_of_sale)
            .description(&record.description)
            .category(&record.category)
            .sold(record.sold);
        create_sale_record(builder, &transaction)?;
        inserted += 1;
    }

    transaction.commit()?;

    Ok(inserted)
}

/// A route handler that replaces the stored sale records with the seed dataset.
pub async fn seed_database_endpoint(State(state): State<SeedState>) -> Response {
    let source_url = &state.seed_config.source_url;
    let result = fetch_seed_records(&state.http_client, source_url)
        .await
        .and_then(|records| {
            let connection = lock_connection(&state.db_connection)?;
            let inserted = replace_sale_records(records, &connection)?;
            let stored = count_sale_records(&connection)?;

            tracing::info!("Seeded {inserted} sale records from {source_url}, {stored} records stored");

            Ok(())
        });

    match result {
        Ok(()) => (StatusCode::OK, "Database seeded successfully").into_response(),
        Err(error) => error.into_plain_text_response("Error seeding the database"),
    }
}
