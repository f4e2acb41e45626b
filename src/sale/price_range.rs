//! Counts a month's sale records in fixed price ranges for the bar chart.
//!
//! Each bucket covers the prices greater than its lower bound and no greater
//! than its upper bound, `(lower, upper]`. The first bucket has no lower bound
//! and the last has no upper bound, so the buckets are contiguous and every
//! price falls in exactly one bucket. For whole-number prices this agrees with
//! the labels, e.g. 100 is in "0-100", 101 and 200 are in "101-200".

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use rusqlite::{Connection, named_params};
use serde::Serialize;
use time::Month;

use crate::{
    Error,
    app_state::lock_connection,
    month::require_month,
    sale::query::{MONTH_PREDICATE, MonthQuery, SaleQueryState},
};

/// A contiguous price range used for histogram counting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBucket {
    /// The label shown to clients, e.g. "101-200".
    pub label: &'static str,
    /// Prices must be greater than this, if set.
    pub lower: Option<f64>,
    /// Prices must be no greater than this, if set.
    pub upper: Option<f64>,
}

impl PriceBucket {
    const fn new(label: &'static str, lower: Option<f64>, upper: Option<f64>) -> Self {
        Self {
            label,
            lower,
            upper,
        }
    }

    /// Whether `price` falls in this bucket.
    #[cfg(test)]
    pub fn contains(&self, price: f64) -> bool {
        self.lower.is_none_or(|lower| price > lower) && self.upper.is_none_or(|upper| price <= upper)
    }
}

/// The price ranges for the bar chart, in display order.
pub const PRICE_BUCKETS: [PriceBucket; 10] = [
    PriceBucket::new("0-100", None, Some(100.0)),
    PriceBucket::new("101-200", Some(100.0), Some(200.0)),
    PriceBucket::new("201-300", Some(200.0), Some(300.0)),
    PriceBucket::new("301-400", Some(300.0), Some(400.0)),
    PriceBucket::new("401-500", Some(400.0), Some(500.0)),
    PriceBucket::new("501-600", Some(500.0), Some(600.0)),
    PriceBucket::new("601-700", Some(600.0), Some(700.0)),
    PriceBucket::new("701-800", Some(700.0), Some(800.0)),
    PriceBucket::new("801-900", Some(800.0), Some(900.0)),
    PriceBucket::new("901-above", Some(900.0), None),
];

/// The number of records in one price range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceRangeCount {
    /// The label of the price range, e.g. "101-200".
    pub range: &'static str,
    /// The number of records priced in the range.
    pub count: u64,
}

/// Count the records dated in `month` of any year in each of [PRICE_BUCKETS].
///
/// The counts are returned in bucket order, including empty buckets.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn count_sale_records_by_price_range(
    month: Month,
    connection: &Connection,
) -> Result<Vec<PriceRangeCount>, Error> {
    let month = u8::from(month);
    let mut statement = connection.prepare(&format!(
        "SELECT COUNT(id) FROM sale WHERE {MONTH_PREDICATE} \
        AND (:lower IS NULL OR price > :lower) \
        AND (:upper IS NULL OR price <= :upper)"
    ))?;

    PRICE_BUCKETS
        .iter()
        .map(|bucket| -> Result<PriceRangeCount, Error> {
            let count: i64 = statement.query_row(
                named_params! {
                    ":month": month,
                    ":lower": bucket.lower,
                    ":upper": bucket.upper,
                },
                |row| row.get(0),
            )?;

            Ok(PriceRangeCount {
                range: bucket.label,
                count: count.unsigned_abs(),
            })
        })
        .collect()
}

/// A route handler for the price range counts of a month.
pub async fn get_bar_chart_endpoint(
    State(state): State<SaleQueryState>,
    Query(params): Query<MonthQuery>,
) -> Response {
    let result = require_month(params.month.as_deref()).and_then(|month| {
        let connection = lock_connection(&state.db_connection)?;
        count_sale_records_by_price_range(month, &connection)
    });

    match result {
        Ok(counts) => Json(counts).into_response(),
        Err(error) => error.into_plain_text_response("Error fetching bar chart data"),
    }
}
