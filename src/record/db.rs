//! Database operations for records.

use rusqlite::{Connection, Row, TransactionBehavior};
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    customer::{CustomerName, ensure_customer},
    record::{DairyRecord, NewRecord, PaymentStatus, RecordId},
};

const RECORD_COLUMNS: &str =
    "id, date, customer_name, quantity, amount, payment_status, created_at";

/// Save `record`, adding its customer first if they do not exist yet.
///
/// The customer and the record are written in one SQL transaction.
pub fn create_record(record: NewRecord, connection: &mut Connection) -> Result<DairyRecord, Error> {
    let transaction = connection.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let record = insert_record(&record, &transaction)?;
    transaction.commit()?;

    Ok(record)
}

/// Insert `record` using the caller's transaction.
pub(crate) fn insert_record(
    record: &NewRecord,
    connection: &Connection,
) -> Result<DairyRecord, Error> {
    ensure_customer(&record.customer_name, connection)?;

    connection
        .prepare(&format!(
            "INSERT INTO dairy_record (date, customer_name, quantity, amount, payment_status, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING {RECORD_COLUMNS}"
        ))?
        .query_row(
            (
                record.date,
                record.customer_name.as_ref(),
                record.quantity,
                record.amount,
                record.payment_status.as_str(),
                OffsetDateTime::now_utc(),
            ),
            map_row,
        )
        .map_err(|error| error.into())
}

/// Retrieve every record, newest date first and then newest creation first.
pub fn get_all_records(connection: &Connection) -> Result<Vec<DairyRecord>, Error> {
    connection
        .prepare(&format!(
            "SELECT {RECORD_COLUMNS} FROM dairy_record
             ORDER BY date DESC, created_at DESC, id DESC"
        ))?
        .query_map([], map_row)?
        .map(|maybe_record| maybe_record.map_err(|error| error.into()))
        .collect()
}

/// Retrieve the records for `date`, newest creation first.
pub fn get_records_on(date: Date, connection: &Connection) -> Result<Vec<DairyRecord>, Error> {
    connection
        .prepare(&format!(
            "SELECT {RECORD_COLUMNS} FROM dairy_record
             WHERE date = ?1
             ORDER BY created_at DESC, id DESC"
        ))?
        .query_map([date], map_row)?
        .map(|maybe_record| maybe_record.map_err(|error| error.into()))
        .collect()
}

/// Delete a record by ID.
///
/// # Errors
/// Returns [Error::DeleteMissingRecord] if there is no record with `record_id`.
pub fn delete_record(record_id: RecordId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM dairy_record WHERE id = ?1", [record_id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingRecord);
    }

    Ok(())
}

/// Initialize the record table and indexes.
///
/// Requires the customer table to exist.
pub fn create_record_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS dairy_record (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            customer_name TEXT NOT NULL,
            quantity REAL NOT NULL CHECK (quantity >= 0),
            amount REAL NOT NULL CHECK (amount >= 0),
            payment_status TEXT NOT NULL CHECK (payment_status IN ('paid', 'due')),
            created_at TEXT NOT NULL,
            FOREIGN KEY(customer_name) REFERENCES customer(name) ON UPDATE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_dairy_record_date ON dairy_record(date);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<DairyRecord, rusqlite::Error> {
    let raw_name: String = row.get(2)?;
    let raw_status: String = row.get(5)?;
    let payment_status = raw_status.parse::<PaymentStatus>().map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, error.into())
    })?;

    Ok(DairyRecord {
        id: row.get(0)?,
        date: row.get(1)?,
        customer_name: CustomerName::new_unchecked(&raw_name),
        quantity: row.get(3)?,
        amount: row.get(4)?,
        payment_status,
        created_at: row.get(6)?,
    })
}

#[cfg(test)]
mod record_query_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        customer::{CustomerName, get_all_customers},
        db::initialize,
        record::{NewRecord, PaymentStatus},
    };

    use super::{create_record, delete_record, get_all_records, get_records_on};

    fn get_test_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        connection
    }

    fn new_record(name: &str, date: time::Date, quantity: f64, amount: f64) -> NewRecord {
        NewRecord {
            date,
            customer_name: CustomerName::new_unchecked(name),
            quantity,
            amount,
            payment_status: PaymentStatus::Due,
        }
    }

    #[test]
    fn create_record_stores_all_fields() {
        let mut connection = get_test_connection();
        let want = new_record("Ram", date!(2025 - 06 - 01), 5.0, 200.0);

        let got = create_record(want.clone(), &mut connection).unwrap();

        assert!(got.id > 0);
        assert_eq!(got.date, want.date);
        assert_eq!(got.customer_name, want.customer_name);
        assert_eq!(got.quantity, 5.0);
        assert_eq!(got.amount, 200.0);
        assert_eq!(got.payment_status, PaymentStatus::Due);
        assert_eq!(get_all_records(&connection).unwrap(), vec![got]);
    }

    #[test]
    fn create_record_adds_missing_customer() {
        let mut connection = get_test_connection();

        create_record(
            new_record("Sita", date!(2025 - 06 - 01), 1.0, 50.0),
            &mut connection,
        )
        .unwrap();
        create_record(
            new_record("Sita", date!(2025 - 06 - 02), 1.0, 50.0),
            &mut connection,
        )
        .unwrap();

        let customers = get_all_customers(&connection).unwrap();
        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0].name.as_ref(), "Sita");
    }

    #[test]
    fn negative_amount_is_rejected_by_the_table() {
        let mut connection = get_test_connection();

        let result = create_record(
            new_record("Ram", date!(2025 - 06 - 01), 0.0, -5.0),
            &mut connection,
        );

        assert!(matches!(result, Err(Error::SqlError(_))));
        assert!(get_all_records(&connection).unwrap().is_empty());
    }

    #[test]
    fn records_are_ordered_newest_date_then_newest_creation() {
        let mut connection = get_test_connection();
        let older = create_record(
            new_record("Ram", date!(2025 - 06 - 01), 1.0, 40.0),
            &mut connection,
        )
        .unwrap();
        let first_today = create_record(
            new_record("Sita", date!(2025 - 06 - 02), 2.0, 80.0),
            &mut connection,
        )
        .unwrap();
        let second_today = create_record(
            new_record("Mohan", date!(2025 - 06 - 02), 3.0, 120.0),
            &mut connection,
        )
        .unwrap();

        let ids = get_all_records(&connection)
            .unwrap()
            .into_iter()
            .map(|record| record.id)
            .collect::<Vec<_>>();

        assert_eq!(ids, vec![second_today.id, first_today.id, older.id]);
    }

    #[test]
    fn get_records_on_filters_by_date() {
        let mut connection = get_test_connection();
        create_record(
            new_record("Ram", date!(2025 - 06 - 01), 1.0, 40.0),
            &mut connection,
        )
        .unwrap();
        let want = create_record(
            new_record("Sita", date!(2025 - 06 - 02), 2.0, 80.0),
            &mut connection,
        )
        .unwrap();

        let got = get_records_on(date!(2025 - 06 - 02), &connection).unwrap();

        assert_eq!(got, vec![want]);
    }

    #[test]
    fn delete_record_removes_it() {
        let mut connection = get_test_connection();
        let record = create_record(
            new_record("Ram", date!(2025 - 06 - 01), 1.0, 40.0),
            &mut connection,
        )
        .unwrap();

        delete_record(record.id, &connection).unwrap();

        assert!(get_all_records(&connection).unwrap().is_empty());
    }

    #[test]
    fn delete_missing_record_fails() {
        let connection = get_test_connection();

        assert_eq!(delete_record(42, &connection), Err(Error::DeleteMissingRecord));
    }
}
