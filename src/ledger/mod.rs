//! The ledger page, its filters and totals, and the JSON export.

mod export;
mod filter;
mod page;
mod totals;

pub use export::export_ledger_endpoint;
pub use filter::{DateRange, LedgerFilter, PaymentFilter};
pub use page::{LedgerState, get_ledger_page};
pub use totals::{Totals, totals_view};
