use axum::{
    extract::{Query, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    ledger::{LedgerFilter, LedgerState},
    record::get_all_records,
    timezone::local_today,
};

/// A route handler that downloads the filtered ledger as pretty-printed JSON.
///
/// The file is named after today's date, e.g. `dairy-records-2025-06-01.json`.
pub async fn export_ledger_endpoint(
    State(state): State<LedgerState>,
    Query(filter): Query<LedgerFilter>,
) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;

    let records = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_all_records(&connection)?
    };

    let records = filter.apply(records, today);
    let json = serde_json::to_string_pretty(&records)
        .map_err(|error| Error::JSONSerializationError(error.to_string()))?;

    tracing::info!("exporting {} records", records.len());

    Ok((
        [
            (CONTENT_TYPE, "application/json".to_owned()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"dairy-records-{today}.json\""),
            ),
        ],
        json,
    )
        .into_response())
}
