//! Import records and customers left behind by the browser-only version of the
//! app.
//!
//! The old app kept everything in browser storage under the keys
//! `dairyRecords` and `dairyCustomers`. Exported, those become two JSON files
//! in a legacy directory which is read once at start-up and then removed.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use rusqlite::{Connection, TransactionBehavior};
use serde::Deserialize;
use time::{Date, Month, macros::format_description};

use crate::{
    Error,
    customer::{CustomerName, ensure_customer, get_all_customers},
    record::{NewRecord, PaymentStatus, insert_record},
};

/// The file holding legacy records.
pub const LEGACY_RECORDS_FILE: &str = "dairyRecords.json";
/// The file holding legacy customer names.
pub const LEGACY_CUSTOMERS_FILE: &str = "dairyCustomers.json";

/// What a migration added to the database.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MigrationReport {
    pub customers_added: usize,
    pub records_added: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyRecord {
    customer_name: String,
    #[serde(default)]
    quantity: Option<f64>,
    amount: f64,
    #[serde(default)]
    payment_status: PaymentStatus,
    date: String,
}

/// Move the legacy cache in `legacy_dir` into the database.
///
/// Customers are added first, then records, all in one SQL transaction. The
/// legacy files are deleted only once that transaction commits, so running
/// this again afterwards does nothing. Names already in the directory are
/// skipped.
///
/// # Errors
///
/// Returns [Error::LegacyCacheError] if a file cannot be read or decoded,
/// [Error::InvalidLegacyDate] for a date in an unknown format, or an SQL
/// error. Nothing is written and no file is removed on error.
pub fn migrate_legacy_cache(
    legacy_dir: &Path,
    connection: &mut Connection,
) -> Result<MigrationReport, Error> {
    let customers_path = legacy_dir.join(LEGACY_CUSTOMERS_FILE);
    let records_path = legacy_dir.join(LEGACY_RECORDS_FILE);

    let customer_names: Vec<String> = read_json_array(&customers_path)?;
    let legacy_records: Vec<LegacyRecord> = read_json_array(&records_path)?;

    if customer_names.is_empty() && legacy_records.is_empty() {
        tracing::debug!("no legacy data found in {}", legacy_dir.display());
        remove_if_present(&[customers_path, records_path]);
        return Ok(MigrationReport::default());
    }

    let new_records = legacy_records
        .into_iter()
        .filter_map(|legacy| match to_new_record(legacy) {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => None,
            Err(error) => Some(Err(error)),
        })
        .collect::<Result<Vec<NewRecord>, Error>>()?;

    let transaction = connection.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let customers_before = get_all_customers(&transaction)?.len();

    for name in &customer_names {
        match CustomerName::new(name) {
            Ok(name) => ensure_customer(&name, &transaction)?,
            Err(_) => tracing::warn!("skipping blank legacy customer name"),
        }
    }

    for record in &new_records {
        insert_record(record, &transaction)?;
    }

    let customers_added = get_all_customers(&transaction)?.len() - customers_before;
    transaction.commit()?;

    remove_if_present(&[customers_path, records_path]);

    let report = MigrationReport {
        customers_added,
        records_added: new_records.len(),
    };
    tracing::info!(
        "migrated {} customers and {} records from {}",
        report.customers_added,
        report.records_added,
        legacy_dir.display()
    );

    Ok(report)
}

/// Read a JSON array from `path`, treating a missing or blank file as empty.
fn read_json_array<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>, Error> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(error) => {
            return Err(Error::LegacyCacheError(format!(
                "{}: {error}",
                path.display()
            )));
        }
    };

    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(&text)
        .map_err(|error| Error::LegacyCacheError(format!("{}: {error}", path.display())))
}

fn to_new_record(legacy: LegacyRecord) -> Result<Option<NewRecord>, Error> {
    let Ok(customer_name) = CustomerName::new(&legacy.customer_name) else {
        tracing::warn!("skipping legacy record without a customer name");
        return Ok(None);
    };

    Ok(Some(NewRecord {
        date: parse_legacy_date(&legacy.date)?,
        customer_name,
        quantity: legacy.quantity.unwrap_or(0.0),
        amount: legacy.amount,
        payment_status: legacy.payment_status,
    }))
}

/// Parse a legacy date, either `DD/MM/YYYY` with optional zero padding, as
/// written by the Indian locale, or ISO `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns [Error::InvalidLegacyDate] if `text` is in neither format or is
/// not a real calendar date.
pub fn parse_legacy_date(text: &str) -> Result<Date, Error> {
    let text = text.trim();
    let invalid = || Error::InvalidLegacyDate(text.to_owned());

    if text.contains('/') {
        let parts: Vec<&str> = text.split('/').collect();
        let [day, month, year] = parts.as_slice() else {
            return Err(invalid());
        };

        let day: u8 = day.parse().map_err(|_| invalid())?;
        let month: u8 = month.parse().map_err(|_| invalid())?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month = Month::try_from(month).map_err(|_| invalid())?;

        return Date::from_calendar_date(year, month, day).map_err(|_| invalid());
    }

    Date::parse(text, format_description!("[year]-[month]-[day]")).map_err(|_| invalid())
}

fn remove_if_present(paths: &[PathBuf]) {
    for path in paths {
        match fs::remove_file(path) {
            Ok(()) => tracing::debug!("removed {}", path.display()),
            Err(error) if error.kind() == ErrorKind::NotFound => {}
            Err(error) => tracing::warn!("could not remove {}: {error}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        customer::{CustomerName, create_customer, get_all_customers},
        db::initialize,
        record::{PaymentStatus, get_all_records},
    };

    use super::{
        LEGACY_CUSTOMERS_FILE, LEGACY_RECORDS_FILE, MigrationReport, migrate_legacy_cache,
        parse_legacy_date,
    };

    fn get_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        connection
    }

    const RECORDS_JSON: &str = r#"[
        {"id": "1", "customerName": "Ram", "quantity": 5, "amount": 200, "paymentStatus": "due", "date": "1/6/2025"},
        {"id": "2", "customerName": "Sita", "amount": 150, "paymentStatus": "paid", "date": "2025-06-02", "timestamp": "x"}
    ]"#;

    #[test]
    fn parses_unpadded_indian_dates() {
        assert_eq!(parse_legacy_date("1/6/2025"), Ok(date!(2025 - 06 - 01)));
        assert_eq!(parse_legacy_date("25/12/2024"), Ok(date!(2024 - 12 - 25)));
        assert_eq!(parse_legacy_date("05/03/2025"), Ok(date!(2025 - 03 - 05)));
    }

    #[test]
    fn parses_iso_dates() {
        assert_eq!(parse_legacy_date("2025-06-02"), Ok(date!(2025 - 06 - 02)));
    }

    #[test]
    fn rejects_bad_dates() {
        for text in ["31/2/2025", "6/1", "yesterday", "2025/06/01/1"] {
            assert_eq!(
                parse_legacy_date(text),
                Err(Error::InvalidLegacyDate(text.to_owned())),
                "{text}"
            );
        }
    }

    #[test]
    fn migrates_customers_and_records_then_removes_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(LEGACY_CUSTOMERS_FILE), r#"["Ram", "Mohan"]"#).unwrap();
        fs::write(dir.path().join(LEGACY_RECORDS_FILE), RECORDS_JSON).unwrap();
        let mut connection = get_connection();

        let report = migrate_legacy_cache(dir.path(), &mut connection).unwrap();

        assert_eq!(
            report,
            MigrationReport {
                customers_added: 3,
                records_added: 2,
            }
        );
        let records = get_all_records(&connection).unwrap();
        assert_eq!(records.len(), 2);
        let sita = records
            .iter()
            .find(|record| record.customer_name.as_ref() == "Sita")
            .unwrap();
        assert_eq!(sita.quantity, 0.0);
        assert_eq!(sita.payment_status, PaymentStatus::Paid);
        assert_eq!(sita.date, date!(2025 - 06 - 02));
        assert!(!dir.path().join(LEGACY_CUSTOMERS_FILE).exists());
        assert!(!dir.path().join(LEGACY_RECORDS_FILE).exists());
    }

    #[test]
    fn tolerates_existing_customers() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(LEGACY_CUSTOMERS_FILE), r#"["Ram"]"#).unwrap();
        let mut connection = get_connection();
        create_customer(CustomerName::new_unchecked("Ram"), &connection).unwrap();

        let report = migrate_legacy_cache(dir.path(), &mut connection).unwrap();

        assert_eq!(report, MigrationReport::default());
        assert_eq!(get_all_customers(&connection).unwrap().len(), 1);
    }

    #[test]
    fn second_run_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(LEGACY_RECORDS_FILE), RECORDS_JSON).unwrap();
        let mut connection = get_connection();
        migrate_legacy_cache(dir.path(), &mut connection).unwrap();

        let report = migrate_legacy_cache(dir.path(), &mut connection).unwrap();

        assert_eq!(report, MigrationReport::default());
        assert_eq!(get_all_records(&connection).unwrap().len(), 2);
    }

    #[test]
    fn empty_directory_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let mut connection = get_connection();

        let report = migrate_legacy_cache(dir.path(), &mut connection).unwrap();

        assert_eq!(report, MigrationReport::default());
    }

    #[test]
    fn bad_date_keeps_files_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(LEGACY_CUSTOMERS_FILE), r#"["Ram"]"#).unwrap();
        fs::write(
            dir.path().join(LEGACY_RECORDS_FILE),
            r#"[{"customerName": "Ram", "amount": 40, "paymentStatus": "due", "date": "someday"}]"#,
        )
        .unwrap();
        let mut connection = get_connection();

        let result = migrate_legacy_cache(dir.path(), &mut connection);

        assert_eq!(result, Err(Error::InvalidLegacyDate("someday".to_owned())));
        assert!(get_all_customers(&connection).unwrap().is_empty());
        assert!(dir.path().join(LEGACY_RECORDS_FILE).exists());
    }

    #[test]
    fn malformed_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(LEGACY_CUSTOMERS_FILE), "not json").unwrap();
        let mut connection = get_connection();

        let result = migrate_legacy_cache(dir.path(), &mut connection);

        assert!(matches!(result, Err(Error::LegacyCacheError(_))));
    }
}
