//! The table of records shared by the home page and the ledger.

use maud::{Markup, html};

use crate::{
    endpoints::{self, format_endpoint},
    html::{
        DUE_BADGE_STYLE, PAID_BADGE_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        delete_button, format_litres, format_rupees,
    },
    record::{DairyRecord, EntryKind, PaymentStatus},
};

/// Render `records` as a table with a delete button on each row.
///
/// Rows have the ID `record-{id}` so a delete removes the row in place.
pub fn records_table_view(records: &[DairyRecord]) -> Markup {
    html! {
        div class="relative overflow-x-auto rounded-lg"
        {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "ग्राहक / Customer" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "दूध / Milk" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "रकम / Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "स्थिति / Status" }
                        th scope="col" class=(TABLE_CELL_STYLE) { span class="sr-only" { "Actions" } }
                    }
                }

                tbody
                {
                    @for record in records {
                        (record_row_view(record))
                    }
                }
            }
        }
    }
}

fn record_row_view(record: &DairyRecord) -> Markup {
    let row_id = format!("record-{}", record.id);
    let delete_url = format_endpoint(endpoints::DELETE_RECORD, record.id);
    let kind = record.kind();
    let status_style = match record.payment_status {
        PaymentStatus::Paid => PAID_BADGE_STYLE,
        PaymentStatus::Due => DUE_BADGE_STYLE,
    };

    html! {
        tr id=(row_id) class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE)
            {
                div class="font-medium text-gray-900 dark:text-white" { (record.customer_name) }
                div class="text-xs" { (record.date) " · " (kind.label()) }
            }
            td class=(TABLE_CELL_STYLE)
            {
                @if kind == EntryKind::MilkSale {
                    (format_litres(record.quantity))
                } @else {
                    "-"
                }
            }
            td class=(TABLE_CELL_STYLE) { (format_rupees(record.amount)) }
            td class=(TABLE_CELL_STYLE)
            {
                @if kind == EntryKind::Absent {
                    span class="text-xs text-yellow-700" { (kind.label()) }
                } @else {
                    span class=(status_style) { (record.payment_status.label()) }
                }
            }
            td class=(TABLE_CELL_STYLE)
            {
                (delete_button(
                    &delete_url,
                    "क्या आप यह रिकॉर्ड हटाना चाहते हैं? / Delete this record?",
                    &format!("#record-{}", record.id),
                ))
            }
        }
    }
}
