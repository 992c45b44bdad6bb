use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    alert::Alert,
    record::{RecordId, delete_record},
};

/// The state needed to delete a record.
#[derive(Debug, Clone)]
pub struct DeleteRecordState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteRecordState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting a record, responds with an alert.
///
/// The client removes the table row itself, so the response body only holds
/// the alert.
pub async fn delete_record_endpoint(
    State(state): State<DeleteRecordState>,
    Path(record_id): Path<RecordId>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match delete_record(record_id, &connection) {
        Ok(()) => Alert::SuccessSimple {
            message: "रिकॉर्ड डिलीट हो गया / Record deleted".to_owned(),
        }
        .into_response(),
        Err(error) => {
            tracing::warn!("could not delete record {record_id}: {error}");
            error.into_alert_response()
        }
    }
}
