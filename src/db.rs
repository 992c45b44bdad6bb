//! Database schema set up.

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::{Error, customer::create_customer_table, record::create_record_table};

/// Create the tables for customers and records if they do not exist.
///
/// Foreign keys are switched on for `connection` so that records can only
/// reference existing customers.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.pragma_update(None, "foreign_keys", "ON")?;

    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_customer_table(&transaction)?;
    create_record_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::initialize;

    #[test]
    fn initialize_is_idempotent() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).unwrap();
        initialize(&connection).unwrap();
    }

    #[test]
    fn records_must_reference_a_customer() {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        let result = connection.execute(
            "INSERT INTO dairy_record (date, customer_name, quantity, amount, payment_status, created_at)
             VALUES ('2025-06-01', 'Nobody', 1, 40, 'due', '2025-06-01 00:00:00.0+00:00')",
            (),
        );

        assert!(result.is_err());
    }
}
