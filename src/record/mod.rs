//! The record store and the endpoints for saving and deleting records.

mod core;
mod create_endpoint;
mod db;
mod delete_endpoint;
mod view;

pub use core::{DairyRecord, EntryKind, NewRecord, PaymentStatus, RecordId};
pub use create_endpoint::{RecordForm, create_record_endpoint};
pub(crate) use db::insert_record;
pub use db::{create_record, create_record_table, delete_record, get_all_records, get_records_on};
pub use delete_endpoint::delete_record_endpoint;
pub use view::records_table_view;
