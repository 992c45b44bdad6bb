//! The home page: pick a day, speak or type an entry, and see that day's
//! records.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::{Date, Duration};

use crate::{
    AppState, Error,
    customer::{Customer, get_all_customers},
    endpoints,
    entry::{EntryEvent, EntryState, EntryType},
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, CARD_STYLE, CARD_TITLE_STYLE,
        FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, HeadElement, LINK_STYLE, PAGE_CONTAINER_STYLE, base,
    },
    ledger::{Totals, totals_view},
    navigation::NavBar,
    record::{PaymentStatus, get_records_on, records_table_view},
    timezone::local_today,
};

/// How many of the selected day's records are listed on the home page.
const RECENT_RECORD_LIMIT: usize = 5;

/// The state needed for the home page.
#[derive(Debug, Clone)]
pub struct HomePageState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub entry_state: Arc<Mutex<EntryState>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub local_timezone: String,
}

impl FromRef<AppState> for HomePageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            entry_state: state.entry_state.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Selections made through links and the date picker.
#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    pub date: Option<Date>,
    pub entry_type: Option<EntryType>,
}

/// Render the home page, applying any date or entry type in the query first.
pub async fn get_home_page(
    State(state): State<HomePageState>,
    Query(query): Query<HomeQuery>,
) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;

    let mut entry_state = state
        .entry_state
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire entry state lock: {error}"))
        .map_err(|_| Error::EntryStateLockError)?;

    if let Some(date) = query.date {
        entry_state.apply(EntryEvent::SelectDate(date));
    }

    if let Some(entry_type) = query.entry_type {
        entry_state.apply(EntryEvent::SelectEntryType(entry_type));
    }

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let customers = get_all_customers(&connection)
        .inspect_err(|error| tracing::error!("could not get customers: {error}"))?;
    let records = get_records_on(entry_state.selected_date, &connection)
        .inspect_err(|error| tracing::error!("could not get records: {error}"))?;

    let totals = Totals::from_records(&records);
    let selected_date = entry_state.selected_date;

    let content = html! {
        (NavBar::new(endpoints::ROOT).into_html())

        main class=(PAGE_CONTAINER_STYLE)
        {
            p class="text-gray-600 dark:text-gray-300 text-sm text-center"
            {
                "बोलो और रिकॉर्ड हो गया! / Speak and Record!"
            }

            (date_picker_view(selected_date, today))

            (entry_section_view(&entry_state, &customers))

            (totals_view(&format!("दिन का हिसाब / Summary for {selected_date}"), &totals))

            section class=(CARD_STYLE)
            {
                h2 class=(CARD_TITLE_STYLE)
                {
                    "📋 रिकॉर्ड / Records for " (selected_date) " (" (records.len()) ")"
                }

                @if records.is_empty() {
                    p class="text-gray-500 text-center py-4"
                    {
                        "कोई रिकॉर्ड नहीं / No records for this date"
                    }
                } @else {
                    (records_table_view(&records[..records.len().min(RECENT_RECORD_LIMIT)]))
                }

                @if records.len() > RECENT_RECORD_LIMIT {
                    div class="text-center mt-4"
                    {
                        a
                            href={ (endpoints::LEDGER_VIEW) "?date_range=all" }
                            class=(LINK_STYLE)
                        {
                            "सभी देखें / View All (" (records.len()) ")"
                        }
                    }
                }
            }
        }
    };

    Ok(base(
        "Home",
        &[HeadElement::ScriptLink("/static/voice.js".to_owned())],
        &content,
    )
    .into_response())
}

fn date_picker_view(selected_date: Date, today: Date) -> Markup {
    let quick_dates = [
        ("आज / Today", 0),
        ("कल / Yesterday", 1),
        ("3 दिन पहले / 3 Days Ago", 3),
        ("हफ्ता पहले / Week Ago", 7),
    ]
    .into_iter()
    .filter_map(|(label, days_ago)| {
        today
            .checked_sub(Duration::days(days_ago))
            .map(|date| (label, date))
    });

    html! {
        section class=(CARD_STYLE)
        {
            h2 class=(CARD_TITLE_STYLE) { "📅 तारीख चुनें / Select Date" }

            div class="grid grid-cols-2 gap-2 mb-3"
            {
                @for (label, date) in quick_dates {
                    a
                        href={ (endpoints::ROOT) "?date=" (date) }
                        class=(BUTTON_SECONDARY_STYLE)
                        aria-current=[(date == selected_date).then_some("date")]
                    {
                        (label)
                    }
                }
            }

            form method="get" action=(endpoints::ROOT) class="flex gap-2"
            {
                input
                    type="date"
                    name="date"
                    value=(selected_date)
                    aria-label="Date"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);

                button type="submit" class=(BUTTON_SECONDARY_STYLE) { "देखें / Go" }
            }
        }
    }
}

/// The voice panel and the manual entry form.
///
/// This section is replaced as a whole after each speech event so the
/// transcript, the listening indicator and the pre-filled form stay in step.
pub(crate) fn entry_section_view(entry_state: &EntryState, customers: &[Customer]) -> Markup {
    html! {
        div id="entry-section" class="w-full space-y-6"
        {
            (voice_panel_view(entry_state))
            (manual_entry_view(entry_state, customers))
        }
    }
}

fn voice_panel_view(entry_state: &EntryState) -> Markup {
    let button_style = if entry_state.is_listening {
        "w-32 h-32 rounded-full text-4xl bg-red-500 hover:bg-red-600 animate-pulse shadow-lg"
    } else {
        "w-32 h-32 rounded-full text-4xl bg-orange-500 hover:bg-orange-600"
    };

    html! {
        section class={ (CARD_STYLE) " border-2 border-orange-200" }
        {
            h2 class={ (CARD_TITLE_STYLE) " text-center" } { "🎤 आवाज़ से एंट्री / Voice Entry" }

            div class="text-center space-y-4"
            {
                button
                    type="button"
                    id="voice-button"
                    data-listening=(entry_state.is_listening)
                    onclick="dairyBoliVoice.toggle()"
                    class=(button_style)
                {
                    @if entry_state.is_listening { "🔴" } @else { "🎤" }
                }

                p class="text-sm font-medium text-gray-700 dark:text-gray-200"
                {
                    @if entry_state.is_listening {
                        "सुन रहा हूँ... / Listening..."
                    } @else {
                        "बोलने के लिए दबाएं / Tap to speak"
                    }
                }

                @if !entry_state.transcript.is_empty() {
                    div class="bg-gray-100 dark:bg-gray-700 p-3 rounded-lg text-left"
                    {
                        p class="text-sm text-gray-600 dark:text-gray-300 mb-1" { "Transcript:" }
                        p id="transcript" class="text-gray-800 dark:text-white" { (entry_state.transcript) }
                    }
                }

                p class="text-xs text-gray-500"
                {
                    "\"Ram ko 5 litre ₹200\" या \"Sita 300 paid\" या \"Radha 200 baaki\" बोलें"
                }
            }
        }
    }
}

fn manual_entry_view(entry_state: &EntryState, customers: &[Customer]) -> Markup {
    let draft = &entry_state.draft;
    let entry_type = entry_state.entry_type;
    let quantity = draft.quantity.map(|quantity| quantity.to_string());
    let amount = draft.amount.map(|amount| amount.to_string());
    let is_paid = draft.payment_status == PaymentStatus::Paid;

    html! {
        section class={ (CARD_STYLE) " border-2 border-green-200" }
        {
            h2 class=(CARD_TITLE_STYLE) { "✏️ मैन्युअल एंट्री / Manual Entry" }

            p class=(FORM_LABEL_STYLE) { "एंट्री का प्रकार / Entry Type" }
            nav class="grid grid-cols-3 gap-2 mb-4" aria-label="Entry type"
            {
                @for option in EntryType::ALL {
                    @let highlight = if option == entry_type { "ring-2 ring-orange-500" } else { "" };
                    a
                        href={ (endpoints::ROOT) "?entry_type=" (option) }
                        aria-current=[(option == entry_type).then_some("true")]
                        class={ (BUTTON_SECONDARY_STYLE) " text-center " (highlight) }
                    {
                        (option.label())
                    }
                }
            }

            form
                hx-post=(endpoints::RECORDS_API)
                hx-target="#entry-feedback"
                hx-target-error="#alert-container"
                class="w-full space-y-4"
            {
                input type="hidden" name="entry_type" value=(entry_type);
                input type="hidden" name="date" value=(entry_state.selected_date);

                div
                {
                    label for="customer_name" class=(FORM_LABEL_STYLE) { "ग्राहक / Customer" }
                    input
                        id="customer_name"
                        type="text"
                        name="customer_name"
                        list="customer-names"
                        placeholder="Ram"
                        value=(draft.customer_name)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                    datalist id="customer-names"
                    {
                        @for customer in customers {
                            option value=(customer.name) {}
                        }
                    }
                }

                @match entry_type {
                    EntryType::Milk => {
                        div class="grid grid-cols-2 gap-4"
                        {
                            div
                            {
                                label for="quantity" class=(FORM_LABEL_STYLE) { "लीटर / Litres" }
                                input
                                    id="quantity"
                                    type="number"
                                    name="quantity"
                                    step="0.5"
                                    min="0"
                                    placeholder="5"
                                    value=[quantity]
                                    class=(FORM_TEXT_INPUT_STYLE);
                            }
                            div
                            {
                                label for="amount" class=(FORM_LABEL_STYLE) { "रुपए / Amount" }
                                input
                                    id="amount"
                                    type="number"
                                    name="amount"
                                    step="any"
                                    min="0"
                                    placeholder="200"
                                    value=[amount.as_deref()]
                                    class=(FORM_TEXT_INPUT_STYLE);
                            }
                        }

                        fieldset
                        {
                            legend class=(FORM_LABEL_STYLE) { "भुगतान / Payment" }
                            div class=(FORM_RADIO_GROUP_STYLE)
                            {
                                div
                                {
                                    input
                                        id="payment-status-due"
                                        type="radio"
                                        name="payment_status"
                                        value="due"
                                        checked[!is_paid]
                                        class=(FORM_RADIO_INPUT_STYLE);
                                    label for="payment-status-due" class=(FORM_RADIO_LABEL_STYLE)
                                    {
                                        (PaymentStatus::Due.label())
                                    }
                                }
                                div
                                {
                                    input
                                        id="payment-status-paid"
                                        type="radio"
                                        name="payment_status"
                                        value="paid"
                                        checked[is_paid]
                                        class=(FORM_RADIO_INPUT_STYLE);
                                    label for="payment-status-paid" class=(FORM_RADIO_LABEL_STYLE)
                                    {
                                        (PaymentStatus::Paid.label())
                                    }
                                }
                            }
                        }
                    }
                    EntryType::Payment => {
                        div
                        {
                            label for="amount" class=(FORM_LABEL_STYLE) { "भुगतान राशि / Payment Amount" }
                            input
                                id="amount"
                                type="number"
                                name="amount"
                                step="any"
                                min="0"
                                placeholder="500"
                                value=[amount.as_deref()]
                                class=(FORM_TEXT_INPUT_STYLE);
                        }
                    }
                    EntryType::Absent => {
                        div class="p-4 bg-yellow-50 rounded-lg text-center"
                        {
                            p class="text-sm text-yellow-700"
                            {
                                "मार्क करने के लिए केवल ग्राहक का नाम चुनें / Just select customer name to mark absent"
                            }
                        }
                    }
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "रिकॉर्ड जोड़ें / Add Record" }
            }

            div id="entry-feedback" class="mt-4" {}
        }
    }
}
