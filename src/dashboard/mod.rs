//! Dashboard module
//!
//! Provides a page showing the statistics, transactions and charts for one
//! month of sale records.

mod charts;
mod handlers;
mod tables;

pub use handlers::get_dashboard_page;
