//! Application router configuration.

use axum::{Router, routing::get};

use crate::{
    AppState,
    combined::get_combined_endpoint,
    dashboard::get_dashboard_page,
    endpoints,
    not_found::get_404_not_found,
    sale::{
        get_bar_chart_endpoint, get_pie_chart_endpoint, get_statistics_endpoint,
        get_transactions_endpoint,
    },
    seed::seed_database_endpoint,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_root))
        .route(endpoints::SEED_DATABASE, get(seed_database_endpoint))
        .route(endpoints::TRANSACTIONS, get(get_transactions_endpoint))
        .route(endpoints::STATISTICS, get(get_statistics_endpoint))
        .route(endpoints::BAR_CHART, get(get_bar_chart_endpoint))
        .route(endpoints::PIE_CHART, get(get_pie_chart_endpoint))
        .route(endpoints::COMBINED, get(get_combined_endpoint))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// A plain text message confirming the server is running.
async fn get_root() -> &'static str {
    "Welcome to the API!"
}

#[cfg(test)]
mod routing_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::Value;

    use crate::{
        AppState, PaginationConfig, SeedConfig, build_router, endpoints,
        sale::query::test_utils::{insert_all, march_fixture},
    };

    fn get_test_server() -> TestServer {
        let state = AppState::new(
            Connection::open_in_memory().unwrap(),
            PaginationConfig::default(),
            // Nothing listens on port 1, so seeding fails fast.
            SeedConfig {
                source_url: "http://127.0.0.1:1/data.json".to_owned(),
            },
        )
        .expect("Could not create app state");
        insert_all(march_fixture(), &state.db_connection.lock().unwrap());

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    /// A server whose queries all fail because the sale table is missing.
    fn get_failing_test_server() -> TestServer {
        let state = AppState::new(
            Connection::open_in_memory().unwrap(),
            PaginationConfig::default(),
            SeedConfig::default(),
        )
        .expect("Could not create app state");
        state
            .db_connection
            .lock()
            .unwrap()
            .execute_batch("DROP TABLE sale;")
            .unwrap();

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn sql_failures_use_endpoint_messages() {
        let server = get_failing_test_server();

        for (endpoint, want_message) in [
            (endpoints::TRANSACTIONS, "Error fetching transactions"),
            (endpoints::STATISTICS, "Error fetching statistics"),
            (endpoints::BAR_CHART, "Error fetching bar chart data"),
            (endpoints::PIE_CHART, "Error fetching pie chart data"),
            (endpoints::COMBINED, "Error fetching combined data"),
            (endpoints::DASHBOARD_VIEW, "Error loading dashboard"),
        ] {
            let response = server
                .get(endpoint)
                .add_query_param("month", "March")
                .await;

            response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
            response.assert_text(want_message);
        }
    }

    #[tokio::test]
    async fn root_returns_welcome_message() {
        let server = get_test_server();

        let response = server.get(endpoints::ROOT).await;

        response.assert_status_ok();
        response.assert_text("Welcome to the API!");
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let server = get_test_server();

        let response = server.get("/does-not-exist").await;

        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_text("Not found");
    }

    #[tokio::test]
    async fn month_is_required_everywhere() {
        let server = get_test_server();

        for endpoint in [
            endpoints::TRANSACTIONS,
            endpoints::STATISTICS,
            endpoints::BAR_CHART,
            endpoints::PIE_CHART,
            endpoints::COMBINED,
        ] {
            let response = server.get(endpoint).await;

            response.assert_status(StatusCode::BAD_REQUEST);
            response.assert_text("Month parameter is required");
        }
    }

    #[tokio::test]
    async fn statistics_returns_month_totals() {
        let server = get_test_server();

        let response = server
            .get(endpoints::STATISTICS)
            .add_query_param("month", "March")
            .await;

        response.assert_status_ok();
        let json = response.json::<Value>();
        assert_eq!(json["soldItems"], 3);
        assert_eq!(json["unsoldItems"], 2);
        assert!(json["totalSaleAmount"].is_f64());
    }

    #[tokio::test]
    async fn transactions_use_camel_case_fields() {
        let server = get_test_server();

        let response = server
            .get(endpoints::TRANSACTIONS)
            .add_query_param("month", "march")
            .add_query_param("perPage", 2)
            .await;

        response.assert_status_ok();
        let json = response.json::<Value>();
        assert_eq!(json["transactions"].as_array().map(Vec::len), Some(2));
        assert!(json["transactions"][0]["dateOfSale"].is_string());
        assert_eq!(json["pagination"]["page"], 1);
        assert_eq!(json["pagination"]["perPage"], 2);
        assert_eq!(json["pagination"]["totalCount"], 5);
    }

    #[tokio::test]
    async fn non_numeric_page_is_bad_request() {
        let server = get_test_server();

        let response = server
            .get(endpoints::TRANSACTIONS)
            .add_query_param("month", "March")
            .add_query_param("page", "two")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn oversized_page_is_bad_request() {
        let server = get_test_server();

        let response = server
            .get(endpoints::TRANSACTIONS)
            .add_query_param("month", "March")
            .add_query_param("perPage", 101)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn bar_chart_returns_every_bucket() {
        let server = get_test_server();

        let response = server
            .get(endpoints::BAR_CHART)
            .add_query_param("month", "March")
            .await;

        response.assert_status_ok();
        let json = response.json::<Value>();
        let buckets = json.as_array().expect("Expected an array of buckets");
        assert_eq!(buckets.len(), 10);
        assert_eq!(buckets[0]["range"], "0-100");
        assert_eq!(buckets[0]["count"], 3);
    }

    #[tokio::test]
    async fn pie_chart_uses_id_field() {
        let server = get_test_server();

        let response = server
            .get(endpoints::PIE_CHART)
            .add_query_param("month", "March")
            .await;

        response.assert_status_ok();
        let json = response.json::<Value>();
        assert_eq!(json[0]["_id"], "electronics");
        assert_eq!(json[0]["count"], 2);
    }

    #[tokio::test]
    async fn combined_total_matches_statistics() {
        let server = get_test_server();

        let response = server
            .get(endpoints::COMBINED)
            .add_query_param("month", "March")
            .await;

        response.assert_status_ok();
        let json = response.json::<Value>();
        let total_count = json["transactions"]["pagination"]["totalCount"].as_u64();
        let sold = json["statistics"]["soldItems"].as_u64().unwrap_or_default();
        let unsold = json["statistics"]["unsoldItems"].as_u64().unwrap_or_default();
        assert_eq!(total_count, Some(sold + unsold));
        assert_eq!(json["barChart"].as_array().map(Vec::len), Some(10));
        assert!(json["pieChart"].is_array());
    }

    #[tokio::test]
    async fn seed_failure_is_reported() {
        let server = get_test_server();

        let response = server.get(endpoints::SEED_DATABASE).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_text("Error seeding the database");
    }

    #[tokio::test]
    async fn dashboard_defaults_to_march() {
        let server = get_test_server();

        let response = server.get(endpoints::DASHBOARD_VIEW).await;

        response.assert_status_ok();
        assert!(response.text().contains("Transactions - March"));
    }
}
