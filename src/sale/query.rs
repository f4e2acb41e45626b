//! The month predicate and request types shared by the sale record queries.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;
use serde::Deserialize;

use crate::{AppState, pagination::PaginationConfig};

/// SQL predicate that selects records whose sale date falls in the month bound
/// to the `:month` parameter (1-12), in any year.
///
/// Dates are stored in UTC so the month is the UTC calendar month.
pub(crate) const MONTH_PREDICATE: &str =
    "CAST(strftime('%m', date_of_sale) AS INTEGER) = :month";

/// The query parameters for endpoints that only take a month.
#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    /// The full English name of the month, e.g. "March".
    pub month: Option<String>,
}

/// The state needed to query sale records.
#[derive(Debug, Clone)]
pub struct SaleQueryState {
    /// The database connection for reading sale records.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for SaleQueryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}
