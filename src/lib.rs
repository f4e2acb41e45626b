//! Sale dashboard is a web app for browsing a month of sale records.
//!
//! This library provides a REST API with month-scoped listing, statistics,
//! price range and category endpoints, plus a server-rendered dashboard page
//! that shows all of them for a single month.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod app_state;
mod combined;
mod dashboard;
mod db;
mod endpoints;
mod html;
mod logging;
mod month;
mod not_found;
mod pagination;
mod routing;
mod sale;
mod seed;

pub use app_state::{AppState, SeedConfig};
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use month::parse_month;
pub use pagination::PaginationConfig;
pub use routing::build_router;
pub use sale::{SaleRecord, SaleRecordBuilder, create_sale_record};
pub use seed::DEFAULT_SEED_URL;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    // If a handler cannot be installed, wait on the other signal instead.
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate_signal) => {
                terminate_signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The client did not specify the month to query.
    #[error("Month parameter is required")]
    MissingMonth,

    /// The month parameter was not one of the twelve English month names.
    #[error("\"{0}\" is not a month, expected a full month name such as \"March\"")]
    InvalidMonth(String),

    /// The page number or page size is out of bounds.
    #[error("invalid pagination: {0}")]
    InvalidPagination(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// The seed dataset could not be downloaded or decoded.
    ///
    /// The error string should only be logged for debugging on the server.
    #[error("could not fetch the seed dataset: {0}")]
    SeedFetch(String),

    /// The HTTP client used for seeding could not be built.
    #[error("could not build the HTTP client: {0}")]
    HttpClient(String),

    /// A record in the seed dataset could not be stored.
    #[error("invalid seed record: {0}")]
    InvalidSeedRecord(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl Error {
    /// Whether the error was caused by the client's request rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::MissingMonth | Error::InvalidMonth(_) | Error::InvalidPagination(_)
        )
    }

    /// Convert the error into a plain text response.
    ///
    /// Client errors are reported with their own message and a 400 status.
    /// Everything else is logged and replaced with `failure_message` and a 500
    /// status so that internal details never reach the client.
    pub fn into_plain_text_response(self, failure_message: &'static str) -> Response {
        if self.is_client_error() {
            return (StatusCode::BAD_REQUEST, self.to_string()).into_response();
        }

        tracing::error!("{failure_message}: {self}");
        (StatusCode::INTERNAL_SERVER_ERROR, failure_message).into_response()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        self.into_plain_text_response("Something went wrong")
    }
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::Error;

    #[test]
    fn missing_month_is_bad_request() {
        let response = Error::MissingMonth.into_plain_text_response("Error fetching statistics");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn sql_error_is_internal_server_error() {
        let response = Error::SqlError(rusqlite::Error::InvalidQuery)
            .into_plain_text_response("Error fetching statistics");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn lock_error_uses_generic_message() {
        let response = Error::DatabaseLockError.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn client_errors_are_classified() {
        assert!(Error::MissingMonth.is_client_error());
        assert!(Error::InvalidMonth("Smarch".to_owned()).is_client_error());
        assert!(Error::InvalidPagination("page".to_owned()).is_client_error());
        assert!(!Error::DatabaseLockError.is_client_error());
        assert!(!Error::SeedFetch("timeout".to_owned()).is_client_error());
        assert!(!Error::HttpClient("no TLS backend".to_owned()).is_client_error());
    }

    #[test]
    fn http_client_error_hides_details() {
        let response = Error::HttpClient("no TLS backend".to_owned())
            .into_plain_text_response("Error seeding the database");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
