//! Database operations for customers.

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error,
    customer::{CreateOutcome, Customer, CustomerName},
};

/// Add a customer named `name`.
///
/// A customer with the exact same name is not an error: the directory is left
/// unchanged and [CreateOutcome::AlreadyExists] is returned.
pub fn create_customer(name: CustomerName, connection: &Connection) -> Result<CreateOutcome, Error> {
    let result = connection
        .prepare(
            "INSERT INTO customer (name, created_at) VALUES (?1, ?2)
             RETURNING id, name, created_at",
        )?
        .query_row((name.as_ref(), OffsetDateTime::now_utc()), map_row);

    match result {
        Ok(customer) => Ok(CreateOutcome::Created(customer)),
        Err(rusqlite::Error::SqliteFailure(error, _))
            if error.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            tracing::debug!("customer \"{name}\" already exists");
            Ok(CreateOutcome::AlreadyExists(name))
        }
        Err(error) => Err(error.into()),
    }
}

/// Add a customer named `name` unless one already exists.
///
/// Used when saving a record so the customer and record are written in the
/// same SQL transaction.
pub(crate) fn ensure_customer(name: &CustomerName, connection: &Connection) -> Result<(), Error> {
    connection.execute(
        "INSERT OR IGNORE INTO customer (name, created_at) VALUES (?1, ?2)",
        (name.as_ref(), OffsetDateTime::now_utc()),
    )?;

    Ok(())
}

/// Retrieve all customers ordered by name.
pub fn get_all_customers(connection: &Connection) -> Result<Vec<Customer>, Error> {
    connection
        .prepare("SELECT id, name, created_at FROM customer ORDER BY name ASC;")?
        .query_map([], map_row)?
        .map(|maybe_customer| maybe_customer.map_err(|error| error.into()))
        .collect()
}

/// Initialize the customer table.
pub fn create_customer_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS customer (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL
        );",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Customer, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let created_at = row.get(2)?;

    Ok(Customer {
        id,
        name: CustomerName::new_unchecked(&raw_name),
        created_at,
    })
}
