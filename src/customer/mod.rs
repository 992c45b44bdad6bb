//! The customer directory and the customers page.

mod core;
mod create;
mod db;
mod list;
mod summary;

pub use core::{CreateOutcome, Customer, CustomerId, CustomerName};
pub use create::create_customer_endpoint;
pub use db::{create_customer, create_customer_table, get_all_customers};
pub(crate) use db::ensure_customer;
pub use list::get_customers_page;
pub use summary::{CustomerOverview, CustomerSummary, summarize_customers};
