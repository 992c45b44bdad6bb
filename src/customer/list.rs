//! The customers page: add a customer and see what each customer owes.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    customer::{CustomerOverview, CustomerSummary, get_all_customers, summarize_customers},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, CARD_STYLE, CARD_TITLE_STYLE, DUE_BADGE_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, PAID_BADGE_STYLE, base, format_litres,
        format_rupees,
    },
    navigation::NavBar,
    record::get_all_records,
};

/// The state needed for the customers page.
#[derive(Debug, Clone)]
pub struct CustomersPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CustomersPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the customers page.
pub async fn get_customers_page(
    State(state): State<CustomersPageState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let customers = get_all_customers(&connection)
        .inspect_err(|error| tracing::error!("could not get customers: {error}"))?;
    let records = get_all_records(&connection)
        .inspect_err(|error| tracing::error!("could not get records: {error}"))?;

    let summaries = summarize_customers(&customers, &records);
    let overview = CustomerOverview::from_summaries(&summaries);

    let content = html! {
        (NavBar::new(endpoints::CUSTOMERS_VIEW).into_html())

        main class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-2xl font-bold" { "👥 ग्राहक / Customers" }

            (overview_view(&overview))

            (add_customer_form_view())

            section class=(CARD_STYLE)
            {
                h2 class=(CARD_TITLE_STYLE) { "सभी ग्राहक / All Customers" }

                @if summaries.is_empty() {
                    p class="text-gray-500 text-center py-4"
                    {
                        "अभी कोई ग्राहक नहीं / No customers yet"
                    }
                } @else {
                    ul class="space-y-3"
                    {
                        @for summary in &summaries {
                            (summary_view(summary))
                        }
                    }
                }
            }
        }
    };

    Ok(base("Customers", &[], &content).into_response())
}

fn overview_view(overview: &CustomerOverview) -> Markup {
    html! {
        section class="grid grid-cols-3 gap-3 w-full text-center"
        {
            div class=(CARD_STYLE)
            {
                div class="text-2xl font-bold text-blue-600" { (overview.total) }
                div class="text-xs" { "कुल / Total" }
            }
            div class=(CARD_STYLE)
            {
                div class="text-2xl font-bold text-green-600" { (overview.clear) }
                div class="text-xs" { "साफ / Clear" }
            }
            div class=(CARD_STYLE)
            {
                div class="text-2xl font-bold text-red-600" { (overview.with_due) }
                div class="text-xs" { "बाकी / With Due" }
            }
        }
    }
}

fn add_customer_form_view() -> Markup {
    html! {
        section class=(CARD_STYLE)
        {
            form
                hx-post=(endpoints::CUSTOMERS_API)
                hx-target-error="#alert-container"
                class="space-y-4"
            {
                div
                {
                    label for="name" class=(FORM_LABEL_STYLE) { "नया ग्राहक / New Customer" }
                    input
                        id="name"
                        name="name"
                        type="text"
                        placeholder="नाम / Name"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "जोड़ें / Add" }
            }
        }
    }
}

fn summary_view(summary: &CustomerSummary) -> Markup {
    html! {
        li class="p-3 rounded-lg border border-gray-200 dark:border-gray-700"
        {
            div class="flex justify-between items-center"
            {
                span class="font-semibold" { (summary.name) }

                @if summary.has_due() {
                    span class=(DUE_BADGE_STYLE) { "बाकी / Due " (format_rupees(summary.due_amount)) }
                } @else {
                    span class=(PAID_BADGE_STYLE) { "साफ / Clear" }
                }
            }

            dl class="grid grid-cols-2 gap-1 mt-2 text-xs text-gray-600 dark:text-gray-300"
            {
                dt { "कुल दूध / Milk" }
                dd { (format_litres(summary.total_milk)) }
                dt { "कुल रकम / Amount" }
                dd { (format_rupees(summary.total_amount)) }
                dt { "मिला / Paid" }
                dd { (format_rupees(summary.paid_amount)) }
                dt { "गैरहाजिर / Absent" }
                dd { (summary.absent_days) }
                dt { "आखिरी / Last" }
                dd
                {
                    @match summary.last_date {
                        Some(date) => { (date) }
                        None => { "-" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use rusqlite::Connection;
    use scraper::Selector;
    use time::macros::date;

    use crate::{
        customer::{CustomerName, create_customer},
        db::initialize,
        endpoints,
        record::{NewRecord, PaymentStatus, create_record},
        test_utils::{
            assert_form_input, assert_form_submit_button, assert_hx_endpoint, assert_status_ok,
            assert_valid_html, must_get_form, parse_html_document,
        },
    };

    use super::{CustomersPageState, get_customers_page};

    fn get_state() -> CustomersPageState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        CustomersPageState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn renders_add_customer_form() {
        let response = get_customers_page(State(get_state())).await.unwrap();

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html, "form[hx-post]");
        assert_hx_endpoint(&form, endpoints::CUSTOMERS_API, "hx-post");
        assert_form_input(&form, "name", "text");
        assert_form_submit_button(&form);
    }

    #[tokio::test]
    async fn lists_customers_with_due_first() {
        let state = get_state();
        {
            let mut connection = state.db_connection.lock().unwrap();
            create_customer(CustomerName::new_unchecked("Sita"), &connection).unwrap();
            create_record(
                NewRecord {
                    date: date!(2025 - 06 - 01),
                    customer_name: CustomerName::new_unchecked("Ram"),
                    quantity: 5.0,
                    amount: 200.0,
                    payment_status: PaymentStatus::Due,
                },
                &mut connection,
            )
            .unwrap();
        }

        let response = get_customers_page(State(state)).await.unwrap();

        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let items = html
            .select(&Selector::parse("main li").unwrap())
            .map(|item| item.text().collect::<String>())
            .collect::<Vec<_>>();
        assert_eq!(items.len(), 2);
        assert!(items[0].starts_with("Ram"), "got {}", items[0]);
        assert!(items[0].contains("₹200"), "got {}", items[0]);
        assert!(items[1].starts_with("Sita"), "got {}", items[1]);
    }
}
