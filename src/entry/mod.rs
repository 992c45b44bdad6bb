//! Entry types, draft validation and the entry panel state.

mod assembly;
mod state;

pub use assembly::{
    AssembledEntry, EntryDraft, EntryType, LARGE_AMOUNT_THRESHOLD, ValidationFailure, assemble,
};
pub use state::{Effect, EntryEvent, EntryState, Notice};
