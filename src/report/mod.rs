//! Pure report aggregation over ledger entries.
//!
//! Nothing here performs I/O; callers recompute a report whenever the entry
//! set or the criteria change.

pub mod aggregate;
pub mod filter;

pub use aggregate::{
    build_report, compute_grouped_report, compute_totals, filter_entries, GroupRow, Report,
    Totals, UNNAMED_LABEL,
};
pub use filter::{DateBound, GroupBy, PaymentFilter, ReportFilter};
