pub mod category;
pub mod common;
pub mod entry;

pub use category::{derive_categories, DEFAULT_CATEGORIES, DEFAULT_FORM_CATEGORY};
pub use common::{EntryId, Identifiable};
pub use entry::{parse_iso_date, Entry, EntryDraft, EntryKind, EXPENSE_LABEL, INCOME_LABEL};
