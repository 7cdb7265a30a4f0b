#[allow(clippy::module_inception)]
pub mod ledger;

pub use crate::domain::{Entry, EntryDraft, EntryId, EntryKind};
pub use ledger::Ledger;
