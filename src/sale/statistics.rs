//! Sale totals for a month.

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Serialize;
use time::Month;

use crate::{
    Error,
    app_state::lock_connection,
    month::require_month,
    sale::query::{MONTH_PREDICATE, MonthQuery, SaleQueryState},
};

/// The sale totals for a month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleStatistics {
    /// The sum of the prices of every record in the month, sold or not.
    pub total_sale_amount: f64,
    /// The number of records in the month that sold.
    pub sold_items: u64,
    /// The number of records in the month that did not sell.
    pub unsold_items: u64,
}

/// Get the sale totals for the records dated in `month` of any year.
///
/// The total sale amount is zero when no records match.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_sale_statistics(month: Month, connection: &Connection) -> Result<SaleStatistics, Error> {
    let month = u8::from(month);

    let total_sale_amount: f64 = connection.query_row(
        &format!("SELECT COALESCE(SUM(price), 0.0) FROM sale WHERE {MONTH_PREDICATE}"),
        &[(":month", &month)],
        |row| row.get(0),
    )?;

    let mut count_statement = connection.prepare(&format!(
        "SELECT COUNT(id) FROM sale WHERE {MONTH_PREDICATE} AND sold = :sold"
    ))?;
    let mut count_where_sold = |sold: bool| -> Result<u64, Error> {
        let count: i64 = count_statement.query_row(
            rusqlite::named_params! {":month": month, ":sold": sold},
            |row| row.get(0),
        )?;

        Ok(count.unsigned_abs())
    };

    let sold_items = count_where_sold(true)?;
    let unsold_items = count_where_sold(false)?;

    Ok(SaleStatistics {
        total_sale_amount,
        sold_items,
        unsold_items,
    })
}

/// A route handler for the sale totals of a month.
pub async fn get_statistics_endpoint(
    State(state): State<SaleQueryState>,
    Query(params): Query<MonthQuery>,
) -> Response {
    let result = require_month(params.month.as_deref()).and_then(|month| {
        let connection = lock_connection(&state.db_connection)?;
        get_sale_statistics(month, &connection)
    });

    match result {
        Ok(statistics) => Json(statistics).into_response(),
        Err(error) => error.into_plain_text_response("Error fetching statistics"),
    }
}
