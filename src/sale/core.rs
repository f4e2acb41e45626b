//! Defines the core data model and database queries for sale records.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};

use crate::Error;
#[cfg(test)]
use crate::sale::query::MONTH_PREDICATE;

/// Alias for the integer type used for sale record IDs.
pub type SaleRecordId = i64;

// ============================================================================
// MODELS
// ============================================================================

/// An item that was put up for sale, and whether it sold.
///
/// To create a new `SaleRecord`, use [SaleRecord::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    /// The ID of the record, assigned by the database.
    pub id: SaleRecordId,
    /// The name of the item.
    pub title: String,
    /// A longer text description of the item.
    pub description: String,
    /// The asking price of the item.
    pub price: f64,
    /// The category label, e.g. "electronics".
    pub category: String,
    /// When the item was sold or listed, in UTC.
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
    /// Whether the item sold.
    pub sold: bool,
}

impl SaleRecord {
    /// Create a new sale record.
    ///
    /// Shortcut for [SaleRecordBuilder] for discoverability.
    pub fn build(title: &str, price: f64, date_of_sale: OffsetDateTime) -> SaleRecordBuilder {
        SaleRecordBuilder {
            title: title.to_owned(),
            description: String::new(),
            price,
            category: String::new(),
            date_of_sale,
            sold: false,
        }
    }
}

/// A builder for creating [SaleRecord] instances.
///
/// The description and category default to empty strings and records default
/// to unsold.
#[derive(Debug, PartialEq, Clone)]
pub struct SaleRecordBuilder {
    /// The name of the item.
    pub title: String,
    /// A longer text description of the item.
    pub description: String,
    /// The asking price. Not validated, negative prices are stored as-is.
    pub price: f64,
    /// The category label.
    pub category: String,
    /// When the item was sold or listed. Converted to UTC when stored.
    pub date_of_sale: OffsetDateTime,
    /// Whether the item sold.
    pub sold: bool,
}

impl SaleRecordBuilder {
    /// Set the description of the record.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    /// Set the category of the record.
    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_owned();
        self
    }

    /// Set whether the item sold.
    pub fn sold(mut self, sold: bool) -> Self {
        self.sold = sold;
        self
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new sale record in the database from a builder.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn create_sale_record(
    builder: SaleRecordBuilder,
    connection: &Connection,
) -> Result<SaleRecord, Error> {
    let record = connection
        .prepare(
            "INSERT INTO sale (title, description, price, category, date_of_sale, sold)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id, title, description, price, category, date_of_sale, sold",
        )?
        .query_row(
            (
                builder.title,
                builder.description,
                builder.price,
                builder.category,
                builder.date_of_sale.to_offset(UtcOffset::UTC),
                builder.sold,
            ),
            map_sale_record_row,
        )?;

    Ok(record)
}

/// Get the total number of sale records in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_sale_records(connection: &Connection) -> Result<u64, Error> {
    let count: i64 = connection.query_row("SELECT COUNT(id) FROM sale", [], |row| row.get(0))?;

    Ok(count.unsigned_abs())
}

/// Get the number of sale records dated in `month` of any year.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
#[cfg(test)]
pub fn count_sale_records_in_month(
    month: time::Month,
    connection: &Connection,
) -> Result<u64, Error> {
    let count: i64 = connection.query_row(
        &format!("SELECT COUNT(id) FROM sale WHERE {MONTH_PREDICATE}"),
        &[(":month", &u8::from(month))],
        |row| row.get(0),
    )?;

    Ok(count.unsigned_abs())
}

/// Create the sale table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_sale_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS sale (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                price REAL NOT NULL,
                category TEXT NOT NULL,
                date_of_sale TEXT NOT NULL,
                sold INTEGER NOT NULL
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_sale_date_of_sale ON sale(date_of_sale);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a SaleRecord.
///
/// Expects the columns in table order: id, title, description, price,
/// category, date_of_sale, sold.
pub fn map_sale_record_row(row: &Row) -> Result<SaleRecord, rusqlite::Error> {
    Ok(SaleRecord {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        price: row.get(3)?,
        category: row.get(4)?,
        date_of_sale: row.get(5)?,
        sold: row.get(6)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================
