use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use dairy_boli::{
    CustomerName, NewRecord, PaymentStatus, create_customer, create_record, get_local_offset,
    initialize_db,
};

/// A utility for creating a demo database for the Dairy Boli server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// How many days of records to create, ending today.
    #[arg(long, default_value_t = 14)]
    days: u16,

    /// The canonical name of the local timezone, used to work out "today".
    #[arg(long, default_value = "Asia/Kolkata")]
    timezone: String,
}

/// Customers with their usual daily litres and price per litre.
const CUSTOMERS: [(&str, f64, f64); 5] = [
    ("Ram", 2.0, 60.0),
    ("Sita", 1.5, 60.0),
    ("Mohan", 3.0, 55.0),
    ("Radha", 1.0, 60.0),
    ("गीता", 2.5, 58.0),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'dairy.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'dairy.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    let Some(offset) = get_local_offset(&args.timezone) else {
        eprintln!("Invalid timezone {}", args.timezone);
        exit(1);
    };
    let today = OffsetDateTime::now_utc().to_offset(offset).date();

    println!("Creating database at {output_path:#?}");
    let mut conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating customers...");
    for (name, _, _) in CUSTOMERS {
        create_customer(CustomerName::new(name)?, &conn)?;
    }

    println!("Creating {} days of records...", args.days);
    for days_ago in (0..i64::from(args.days)).rev() {
        let date = today - Duration::days(days_ago);

        for (index, (name, litres, price)) in CUSTOMERS.into_iter().enumerate() {
            let customer_name = CustomerName::new(name)?;

            // Every customer skips one day a week, on a different day each.
            let record = if (days_ago + index as i64) % 7 == 6 {
                NewRecord {
                    date,
                    customer_name,
                    quantity: 0.0,
                    amount: 0.0,
                    payment_status: PaymentStatus::Due,
                }
            } else {
                NewRecord {
                    date,
                    customer_name,
                    quantity: litres,
                    amount: litres * price,
                    payment_status: PaymentStatus::Due,
                }
            };

            create_record(record, &mut conn)?;
        }

        // Weekly payments.
        if days_ago % 7 == 0 {
            for (name, litres, price) in CUSTOMERS.into_iter().take(3) {
                create_record(
                    NewRecord {
                        date,
                        customer_name: CustomerName::new(name)?,
                        quantity: 0.0,
                        amount: litres * price * 6.0,
                        payment_status: PaymentStatus::Paid,
                    },
                    &mut conn,
                )?;
            }
        }
    }

    println!("Success!");

    Ok(())
}
