//! Sets up the application's SQLite database.

use rusqlite::{Connection, Transaction as SqlTransaction, functions::FunctionFlags};

use crate::{Error, sale::create_sale_table};

/// The SQL function that lowercases text using Unicode rules.
///
/// SQLite's built-in `lower()` only folds ASCII letters.
const UNICODE_LOWER_FUNCTION: &str = "unicode_lower";

/// Create the tables for the domain models if they do not already exist and
/// register the SQL functions the queries rely on.
///
/// # Errors
/// Returns an [Error::SqlError] if a table could not be created or a function
/// could not be registered.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    register_functions(connection)?;

    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_sale_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

/// Register the application's SQL functions on `connection`.
///
/// Functions live on the connection, not in the database file, so this must
/// run for every connection.
fn register_functions(connection: &Connection) -> Result<(), Error> {
    connection.create_scalar_function(
        UNICODE_LOWER_FUNCTION,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |context| {
            let text: Option<String> = context.get(0)?;
            Ok(text.map(|text| text.to_lowercase()))
        },
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::initialize;

    #[test]
    fn initialize_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        initialize(&conn).expect("first initialization failed");
        initialize(&conn).expect("second initialization failed");

        let table_count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'sale'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(table_count, 1);
    }

    #[test]
    fn unicode_lower_folds_non_ascii_letters() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        let got: String = conn
            .query_row("SELECT unicode_lower('ÉCHARPE Ünïcode')", [], |row| row.get(0))
            .unwrap();

        assert_eq!(got, "écharpe ünïcode");
    }

    #[test]
    fn unicode_lower_passes_null_through() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        let got: Option<String> = conn
            .query_row("SELECT unicode_lower(NULL)", [], |row| row.get(0))
            .unwrap();

        assert_eq!(got, None);
    }
}
