//! Sale records and the month-scoped queries over them.
//!
//! This module contains everything related to sale records:
//! - The `SaleRecord` model and `SaleRecordBuilder` for creating records
//! - The month predicate shared by every query
//! - The listing, statistics, price range and category queries and their
//!   route handlers

mod category;
mod core;
mod listing;
mod price_range;
pub(crate) mod query;
mod statistics;

pub use category::{CategoryCount, count_sale_records_by_category, get_pie_chart_endpoint};
pub use core::{
    SaleRecord, SaleRecordBuilder, count_sale_records, create_sale_record, create_sale_table,
    map_sale_record_row,
};
pub use listing::{
    ListingParams, SaleListing, SearchTerm, get_transactions_endpoint, list_sale_records,
};
pub use price_range::{PriceRangeCount, count_sale_records_by_price_range, get_bar_chart_endpoint};
pub use query::SaleQueryState;
pub use statistics::{SaleStatistics, get_sale_statistics, get_statistics_endpoint};

#[cfg(test)]
pub use core::count_sale_records_in_month;
#[cfg(test)]
pub use price_range::PRICE_BUCKETS;
