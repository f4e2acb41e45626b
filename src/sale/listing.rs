//! The paginated, searchable listing of a month's sale records.

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use rusqlite::{Connection, named_params};
use serde::{Deserialize, Serialize};
use time::Month;

use crate::{
    Error,
    app_state::lock_connection,
    month::require_month,
    pagination::{PageRequest, PaginationSummary},
    sale::{
        SaleRecord, map_sale_record_row,
        query::{MONTH_PREDICATE, SaleQueryState},
    },
};

/// SQL predicate for the search term bound to `:search` and `:price`.
///
/// An empty search matches everything. Otherwise a record matches if its title
/// or description contains the search text, ignoring case, or if its price
/// equals `:price` (NULL when the search is not a number).
///
/// `unicode_lower` is registered by [crate::db::initialize].
const SEARCH_PREDICATE: &str = "(:search = '' \
    OR instr(unicode_lower(title), unicode_lower(:search)) > 0 \
    OR instr(unicode_lower(description), unicode_lower(:search)) > 0 \
    OR price = :price)";

/// The query parameters for listing sale records.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingParams {
    /// The full English name of the month, e.g. "March".
    pub month: Option<String>,
    /// The one-based page number.
    pub page: Option<u64>,
    /// The number of records per page.
    pub per_page: Option<u64>,
    /// Text to look for in titles and descriptions, or an exact price.
    pub search: Option<String>,
}

/// A search over titles, descriptions and prices.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTerm {
    text: String,
    price: Option<f64>,
}

impl SearchTerm {
    /// Create a search term from user input.
    ///
    /// Surrounding whitespace is ignored. The text is matched literally, it is
    /// not a pattern. If the text is a finite number, records with exactly that
    /// price also match.
    pub fn new(search: &str) -> Self {
        let text = search.trim();
        let price = text
            .parse::<f64>()
            .ok()
            .filter(|price| price.is_finite());

        Self {
            text: text.to_owned(),
            price,
        }
    }

    /// The search text with surrounding whitespace removed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the search matches every record.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A page of sale records and the details needed to request other pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleListing {
    /// The records on the requested page, ordered by ID.
    pub transactions: Vec<SaleRecord>,
    /// The requested page and the number of matching records.
    pub pagination: PaginationSummary,
}

/// Get one page of the sale records dated in `month` of any year that match `search`.
///
/// Records are ordered by ID so that consecutive pages neither repeat nor skip
/// records.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn list_sale_records(
    month: Month,
    search: &SearchTerm,
    page_request: PageRequest,
    connection: &Connection,
) -> Result<SaleListing, Error> {
    let month = u8::from(month);
    let offset = i64::try_from(page_request.offset())
        .map_err(|_| Error::InvalidPagination("page is too large".to_owned()))?;
    let limit = i64::try_from(page_request.per_page)
        .map_err(|_| Error::InvalidPagination("perPage is too large".to_owned()))?;

    let transactions = connection
        .prepare(&format!(
            "SELECT id, title, description, price, category, date_of_sale, sold FROM sale \
            WHERE {MONTH_PREDICATE} AND {SEARCH_PREDICATE} \
            ORDER BY id ASC LIMIT :limit OFFSET :offset"
        ))?
        .query_map(
            named_params! {
                ":month": month,
                ":search": search.text,
                ":price": search.price,
                ":limit": limit,
                ":offset": offset,
            },
            map_sale_record_row,
        )?
        .collect::<Result<Vec<_>, _>>()?;

    let total_count: i64 = connection.query_row(
        &format!("SELECT COUNT(id) FROM sale WHERE {MONTH_PREDICATE} AND {SEARCH_PREDICATE}"),
        named_params! {
            ":month": month,
            ":search": search.text,
            ":price": search.price,
        },
        |row| row.get(0),
    )?;

    Ok(SaleListing {
        transactions,
        pagination: PaginationSummary {
            page: page_request.page,
            per_page: page_request.per_page,
            total_count: total_count.unsigned_abs(),
        },
    })
}

/// A route handler for listing a page of a month's sale records.
pub async fn get_transactions_endpoint(
    State(state): State<SaleQueryState>,
    Query(params): Query<ListingParams>,
) -> Response {
    let result = require_month(params.month.as_deref()).and_then(|month| {
        let page_request = state
            .pagination_config
            .page_request(params.page, params.per_page)?;
        let search = SearchTerm::new(params.search.as_deref().unwrap_or_default());
        let connection = lock_connection(&state.db_connection)?;

        list_sale_records(month, &search, page_request, &connection)
    });

    match result {
        Ok(listing) => Json(listing).into_response(),
        Err(error) => error.into_plain_text_response("Error fetching transactions"),
    }
}
