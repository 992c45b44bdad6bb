//! Defines the endpoint for saving a record from the entry form.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error, endpoints,
    entry::{AssembledEntry, EntryDraft, EntryEvent, EntryState, EntryType, assemble},
    html::{BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, format_rupees},
    record::{PaymentStatus, create_record},
};

/// The state needed to save a record.
#[derive(Debug, Clone)]
pub struct CreateRecordState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub entry_state: Arc<Mutex<EntryState>>,
}

impl FromRef<AppState> for CreateRecordState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            entry_state: state.entry_state.clone(),
        }
    }
}

/// The form data for saving a record.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordForm {
    pub customer_name: String,
    pub entry_type: EntryType,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    pub date: Date,
    /// Set when the user has confirmed a large amount.
    #[serde(default)]
    pub confirmed: bool,
}

/// A route handler for saving a record, redirects to the home page on success.
///
/// Large amounts are not saved straight away, instead the response asks the
/// user to confirm and resubmit with `confirmed=true`.
pub async fn create_record_endpoint(
    State(state): State<CreateRecordState>,
    Form(form): Form<RecordForm>,
) -> Response {
    let draft = EntryDraft {
        customer_name: form.customer_name.clone(),
        quantity: form.quantity,
        amount: form.amount,
        payment_status: form.payment_status,
    };

    let entry = match assemble(&draft, form.entry_type, form.date) {
        Ok(entry) => entry,
        Err(failure) => {
            tracing::debug!("rejected record form: {failure:?}");
            return Error::from(failure).into_alert_response();
        }
    };

    if entry.needs_confirmation && !form.confirmed {
        return Html(confirmation_view(&entry, form.entry_type).into_string()).into_response();
    }

    let mut entry_state = match state.entry_state.lock() {
        Ok(entry_state) => entry_state,
        Err(error) => {
            tracing::error!("could not acquire entry state lock: {error}");
            return Error::EntryStateLockError.into_alert_response();
        }
    };

    let mut connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    if let Err(error) = create_record(entry.record, &mut connection) {
        tracing::error!("could not create record: {error}");

        return error.into_alert_response();
    }

    entry_state.apply(EntryEvent::RecordSaved);

    (
        HxRedirect(endpoints::ROOT.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

fn confirmation_view(entry: &AssembledEntry, entry_type: EntryType) -> Markup {
    let record = &entry.record;
    let amount = format_rupees(record.amount);

    html! {
        div
            id="large-amount-confirmation"
            role="alertdialog"
            class="p-4 rounded-lg border border-yellow-300 bg-yellow-50 text-yellow-800 space-y-3"
        {
            p class="font-medium"
            {
                "बड़ी रकम: " (amount) "। क्या आप सुनिश्चित हैं? / Large amount: " (amount) ". Are you sure?"
            }

            form
                hx-post=(endpoints::RECORDS_API)
                hx-target="#entry-feedback"
                hx-target-error="#alert-container"
                class="flex gap-2"
            {
                input type="hidden" name="customer_name" value=(record.customer_name);
                input type="hidden" name="entry_type" value=(entry_type);
                input type="hidden" name="quantity" value=(record.quantity);
                input type="hidden" name="amount" value=(record.amount);
                input type="hidden" name="payment_status" value=(record.payment_status);
                input type="hidden" name="date" value=(record.date);
                input type="hidden" name="confirmed" value="true";

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "हाँ, सेव करें / Yes, save" }
                button
                    type="button"
                    class=(BUTTON_SECONDARY_STYLE)
                    onclick="this.closest('#large-amount-confirmation').remove()"
                {
                    "रद्द करें / Cancel"
                }
            }
        }
    }
}
