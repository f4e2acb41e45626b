//! A single response with every section of a month's report.

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
    pagination::PageRequest,
    sale::{
        CategoryCount, ListingParams, PriceRangeCount, SaleListing, SaleQueryState,
        SaleStatistics, SearchTerm, count_sale_records_by_category,
        count_sale_records_by_price_range, get_sale_statistics, list_sale_records,
    },
};

/// The listing, statistics, price ranges and categories for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthReport {
    /// A page of the month's sale records.
    pub transactions: SaleListing,
    /// The month's sale totals.
    pub statistics: SaleStatistics,
    /// The month's record counts per price range.
    pub bar_chart: Vec<PriceRangeCount>,
    /// The month's record counts per category.
    pub pie_chart: Vec<CategoryCount>,
}

/// Build every section of the report for `month`.
///
/// All sections are read through the same connection. If any section fails
/// the whole report fails.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn build_month_report(
    month: Month,
    search: &SearchTerm,
    page_request: PageRequest,
    connection: &Connection,
) -> Result<MonthReport, Error> {
    Ok(MonthReport {
        transactions: list_sale_records(month, search, page_request, connection)?,
        statistics: get_sale_statistics(month, connection)?,
        bar_chart: count_sale_records_by_price_range(month, connection)?,
        pie_chart: count_sale_records_by_category(month, connection)?,
    })
}

/// A route handler for the combined report of a month.
///
/// Takes the same parameters as the listing endpoint, which only affect the
/// `transactions` section.
pub async fn get_combined_endpoint(
    State(state): State<SaleQueryState>,
    Query(params): Query<ListingParams>,
) -> Response {
    let result = require_month(params.month.as_deref()).and_then(|month| {
        let page_request = state
            .pagination_config
            .page_request(params.page, params.per_page)?;
        let search = SearchTerm::new(params.search.as_deref().unwrap_or_default());
        let connection = lock_connection(&state.db_connection)?;

        build_month_report(month, &search, page_request, &connection)
    });

    match result {
        Ok(report) => Json(report).into_response(),
        Err(error) => error.into_plain_text_response("Error fetching combined data"),
    }
}
