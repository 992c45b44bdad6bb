//! The ledger page: every record matching the chosen filters.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, CARD_STYLE, CARD_TITLE_STYLE,
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, base,
    },
    ledger::{DateRange, LedgerFilter, PaymentFilter, Totals, totals_view},
    navigation::NavBar,
    record::{get_all_records, records_table_view},
    timezone::local_today,
};

/// The state needed for the ledger page and export.
#[derive(Debug, Clone)]
pub struct LedgerState {
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub local_timezone: String,
}

impl FromRef<AppState> for LedgerState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render the ledger page for the filters in the query string.
pub async fn get_ledger_page(
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

        get_all_records(&connection)
            .inspect_err(|error| tracing::error!("could not get records: {error}"))?
    };

    let records = filter.apply(records, today);
    let totals = Totals::from_records(&records);
    let export_url = format!("{}?{}", endpoints::LEDGER_EXPORT, filter.to_query());

    let content = html! {
        (NavBar::new(endpoints::LEDGER_VIEW).into_html())

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="flex w-full items-center justify-between"
            {
                h1 class="text-2xl font-bold text-orange-600" { "📋 खाता / Daily Ledger" }

                a href=(export_url) download class=(BUTTON_SECONDARY_STYLE)
                {
                    "⬇ एक्सपोर्ट / Export"
                }
            }

            (filter_form_view(&filter))

            (totals_view(&format!("कुल / Totals ({})", totals.count), &totals))

            section class=(CARD_STYLE)
            {
                h2 class=(CARD_TITLE_STYLE) { "रिकॉर्ड / Records" }

                @if records.is_empty() {
                    p class="text-gray-500 text-center py-4"
                    {
                        "कोई रिकॉर्ड नहीं मिला / No records found"
                    }
                } @else {
                    (records_table_view(&records))
                }
            }
        }
    };

    Ok(base("Ledger", &[], &content).into_response())
}

fn filter_form_view(filter: &LedgerFilter) -> Markup {
    html! {
        section class=(CARD_STYLE)
        {
            h2 class=(CARD_TITLE_STYLE) { "🔍 फिल्टर / Filters" }

            form method="get" action=(endpoints::LEDGER_VIEW) class="space-y-4"
            {
                div
                {
                    label for="search" class=(FORM_LABEL_STYLE) { "ग्राहक खोजें / Search Customer" }
                    input
                        id="search"
                        name="search"
                        type="search"
                        placeholder="Customer name..."
                        value=[filter.search_term()]
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div class="grid grid-cols-2 gap-4"
                {
                    div
                    {
                        label for="date_range" class=(FORM_LABEL_STYLE) { "तारीख / Date" }
                        select id="date_range" name="date_range" class=(FORM_TEXT_INPUT_STYLE)
                        {
                            @for range in DateRange::ALL {
                                option value=(range) selected[range == filter.date_range] { (range.label()) }
                            }
                        }
                    }

                    div
                    {
                        label for="payment" class=(FORM_LABEL_STYLE) { "भुगतान / Payment" }
                        select id="payment" name="payment" class=(FORM_TEXT_INPUT_STYLE)
                        {
                            @for payment in PaymentFilter::ALL {
                                option value=(payment) selected[payment == filter.payment] { (payment.label()) }
                            }
                        }
                    }
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "लागू करें / Apply" }
            }
        }
    }
}
