use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Date, Month, OffsetDateTime, Time};

use sale_dashboard::{SaleRecord, create_sale_record, initialize_db};

const CATEGORIES: [&str; 4] = [
    "electronics",
    "jewelery",
    "men's clothing",
    "women's clothing",
];

/// A utility for creating a test database for the sale dashboard server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// The number of sale records to create for each month.
    #[arg(long, default_value_t = 12)]
    records_per_month: u8,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating sale records...");

    let mut record_count = 0;
    for month_number in 1..=12u8 {
        let month = Month::try_from(month_number)?;

        for index in 0..args.records_per_month {
            // Spread records over two years and every price range.
            let year = 2021 + i32::from(index % 2);
            let day = index % 28 + 1;
            let date = Date::from_calendar_date(year, month, day)?;
            let price = f64::from(index) * 97.5 + f64::from(month_number) * 1.25;
            let category = CATEGORIES[usize::from(index) % CATEGORIES.len()];

            let builder = SaleRecord::build(
                &format!("Sample {category} item #{month_number}-{index}"),
                price,
                OffsetDateTime::new_utc(date, Time::MIDNIGHT),
            )
            .description(&format!("A sample {category} item listed in {month}"))
            .category(category)
            .sold(index % 3 != 0);

            create_sale_record(builder, &conn)?;
            record_count += 1;
        }
    }

    println!("Created {record_count} sale records.");
    println!("Success!");

    Ok(())
}
