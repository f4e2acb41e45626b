//! Groups a month's sale records by category for the pie chart.

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

/// The number of records with a given category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    /// The category label.
    #[serde(rename = "_id")]
    pub category: String,
    /// The number of records with the category.
    pub count: u64,
}

/// Count the records dated in `month` of any year for each category.
///
/// Only categories with at least one record in the month are returned, ordered
/// by category name.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn count_sale_records_by_category(
    month: Month,
    connection: &Connection,
) -> Result<Vec<CategoryCount>, Error> {
    connection
        .prepare(&format!(
            "SELECT category, COUNT(id) FROM sale WHERE {MONTH_PREDICATE} \
            GROUP BY category ORDER BY category ASC"
        ))?
        .query_map(&[(":month", &u8::from(month))], |row| {
            let count: i64 = row.get(1)?;

            Ok(CategoryCount {
                category: row.get(0)?,
                count: count.unsigned_abs(),
            })
        })?
        .map(|count_result| count_result.map_err(Error::from))
        .collect()
}

/// A route handler for the category counts of a month.
pub async fn get_pie_chart_endpoint(
    State(state): State<SaleQueryState>,
    Query(params): Query<MonthQuery>,
) -> Response {
    let result = require_month(params.month.as_deref()).and_then(|month| {
        let connection = lock_connection(&state.db_connection)?;
        count_sale_records_by_category(month, &connection)
    });

    match result {
        Ok(counts) => Json(counts).into_response(),
        Err(error) => error.into_plain_text_response("Error fetching pie chart data"),
    }
}

#[cfg(test)]
mod tests {
    use time::Month;

    use crate::sale::query::test_utils::{
        get_test_connection, insert_all, march, march_fixture,
    };

    use crate::Error;

    use super::{CategoryCount, count_sale_records_by_category};

    fn category_count(category: &str, count: u64) -> CategoryCount {
        CategoryCount {
            category: category.to_owned(),
            count,
        }
    }

    #[test]
    fn groups_month_by_category() {
        let conn = get_test_connection();
        insert_all(march_fixture(), &conn);

        let got = count_sale_records_by_category(Month::March, &conn).unwrap();

        assert_eq!(
            got,
            [
                category_count("electronics", 2),
                category_count("jewelery", 1),
                category_count("men's clothing", 1),
                category_count("women's clothing", 1),
            ]
        );
    }

    #[test]
    fn empty_month_has_no_groups() {
        let conn = get_test_connection();
        insert_all(march_fixture(), &conn);

        let got = count_sale_records_by_category(Month::October, &conn).unwrap();

        assert!(got.is_empty());
    }

    #[test]
    fn uses_whatever_categories_exist() {
        let conn = get_test_connection();
        insert_all(
            vec![
                march(1, 1.0).category("garden"),
                march(2, 2.0).category("garden"),
                march(3, 3.0),
            ],
            &conn,
        );

        let got = count_sale_records_by_category(Month::March, &conn).unwrap();

        assert_eq!(got, [category_count("", 1), category_count("garden", 2)]);
    }

    #[test]
    fn unreadable_category_is_sql_error() {
        let conn = get_test_connection();
        conn.execute(
            "INSERT INTO sale (title, description, price, category, date_of_sale, sold) \
            VALUES ('Broken', '', 1.0, X'00FF', '2022-03-10 12:00:00', 0)",
            (),
        )
        .unwrap();

        let got = count_sale_records_by_category(Month::March, &conn);

        assert!(matches!(got, Err(Error::SqlError(_))));
    }

    #[test]
    fn serializes_category_as_id() {
        let json = serde_json::to_value(category_count("electronics", 2)).unwrap();

        assert_eq!(json, serde_json::json!({"_id": "electronics", "count": 2}));
    }
}
