//! Dairy Boli is a bilingual (Hindi/English) record book for a dairy vendor.
//!
//! Milk sales, payments and absences are logged per customer either through a
//! form or by speaking a short phrase such as "ram ko 5 litre doodh 200
//! rupees". The browser turns speech into text, and this library turns the
//! text into a draft record, stores records in SQLite and serves the HTML
//! pages for the daily view, the ledger and the customer overview.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod customer;
mod db;
mod endpoints;
mod entry;
mod home;
mod html;
mod internal_server_error;
mod ledger;
mod logging;
mod migration;
mod navigation;
mod not_found;
mod record;
mod routing;
mod speech;
mod timezone;
mod transcript;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use customer::{CreateOutcome, Customer, CustomerName, create_customer, get_all_customers};
pub use db::initialize as initialize_db;
pub use entry::{
    AssembledEntry, EntryDraft, EntryType, LARGE_AMOUNT_THRESHOLD, ValidationFailure, assemble,
};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use migration::{MigrationReport, migrate_legacy_cache};
pub use record::{DairyRecord, EntryKind, NewRecord, PaymentStatus, create_record};
pub use routing::build_router;
pub use speech::{CaptureErrorKind, SpeechEvent};
pub use timezone::get_local_offset;
pub use transcript::{ParsedTranscript, TranscriptParse, infer_entry_type, parse_transcript};

use crate::{alert::Alert, internal_server_error::InternalServerError, not_found::get_404_not_found_response};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string was used as a customer name.
    #[error("customer name cannot be empty")]
    EmptyCustomerName,

    /// A draft record did not have the fields its entry type requires.
    #[error("{0}")]
    Validation(#[from] ValidationFailure),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// Could not acquire the lock on the entry form state.
    #[error("could not acquire the entry state lock")]
    EntryStateLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Tried to delete a record that does not exist
    #[error("tried to delete a record that is not in the database")]
    DeleteMissingRecord,

    /// A date in the legacy cache was neither `DD/MM/YYYY` nor `YYYY-MM-DD`.
    #[error("could not read the legacy date \"{0}\"")]
    InvalidLegacyDate(String),

    /// The legacy cache could not be read or decoded.
    ///
    /// The string holds the underlying I/O or JSON error message.
    #[error("could not read the legacy cache: {0}")]
    LegacyCacheError(String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::DatabaseLockError | Error::EntryStateLockError => {
                InternalServerError::default().into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::EmptyCustomerName => Alert::Error {
                message: "कृपया नाम भरें / Please fill customer name".to_owned(),
                details: String::new(),
            }
            .into_response_with_status(StatusCode::BAD_REQUEST),
            Error::Validation(failure) => Alert::Error {
                message: failure.to_string(),
                details: String::new(),
            }
            .into_response_with_status(StatusCode::BAD_REQUEST),
            Error::InvalidTimezoneError(timezone) => Alert::Error {
                message: "Invalid Timezone Settings".to_owned(),
                details: format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response_with_status(StatusCode::INTERNAL_SERVER_ERROR),
            Error::DeleteMissingRecord => Alert::Error {
                message: "Could not delete record".to_owned(),
                details: "The record could not be found. \
                    Try refreshing the page to see if the record has already been deleted."
                    .to_owned(),
            }
            .into_response_with_status(StatusCode::NOT_FOUND),
            _ => Alert::Error {
                message: "Something went wrong".to_owned(),
                details: "An unexpected error occurred, check the server logs for more details."
                    .to_owned(),
            }
            .into_response_with_status(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}
