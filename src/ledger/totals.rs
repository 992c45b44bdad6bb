//! Sums over a set of records.

use maud::{Markup, html};

use crate::{
    html::{CARD_STYLE, CARD_TITLE_STYLE, format_litres, format_rupees},
    record::{DairyRecord, PaymentStatus},
};

/// Totals for a set of records.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Totals {
    /// Litres of milk across all records.
    pub total_milk: f64,
    /// Rupees across all records.
    pub total_amount: f64,
    /// Rupees on paid records.
    pub paid_amount: f64,
    /// Rupees on due records.
    pub due_amount: f64,
    /// The number of records.
    pub count: usize,
}

impl Totals {
    pub fn from_records(records: &[DairyRecord]) -> Self {
        records.iter().fold(Totals::default(), |mut totals, record| {
            totals.total_milk += record.quantity;
            totals.total_amount += record.amount;
            match record.payment_status {
                PaymentStatus::Paid => totals.paid_amount += record.amount,
                PaymentStatus::Due => totals.due_amount += record.amount,
            }
            totals.count += 1;
            totals
        })
    }
}

/// Render `totals` as a card of four figures.
pub fn totals_view(title: &str, totals: &Totals) -> Markup {
    let figure = |value: String, label: &str, colour: &str| {
        html! {
            div class="bg-white dark:bg-gray-700 p-3 rounded-lg shadow-sm text-center"
            {
                div class={ "text-2xl font-bold " (colour) } { (value) }
                div class="text-xs text-gray-600 dark:text-gray-300" { (label) }
            }
        }
    };

    html! {
        section class=(CARD_STYLE)
        {
            h2 class=(CARD_TITLE_STYLE) { (title) }

            div class="grid grid-cols-2 gap-4"
            {
                (figure(format_litres(totals.total_milk), "कुल दूध / Total Milk", "text-blue-600"))
                (figure(format_rupees(totals.total_amount), "कुल रकम / Total Amount", "text-purple-600"))
                (figure(format_rupees(totals.paid_amount), "मिला / Paid", "text-green-600"))
                (figure(format_rupees(totals.due_amount), "बाकी / Due", "text-red-600"))
            }
        }
    }
}
