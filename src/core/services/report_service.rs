use crate::ledger::Ledger;
use crate::report::{self, GroupBy, GroupRow, Report, ReportFilter, Totals};

pub struct ReportService;

impl ReportService {
    pub fn totals(ledger: &Ledger, filter: &ReportFilter) -> Totals {
        report::compute_totals(ledger.entries(), filter)
    }

    pub fn grouped(ledger: &Ledger, filter: &ReportFilter, group_by: GroupBy) -> Vec<GroupRow> {
        report::compute_grouped_report(ledger.entries(), filter, group_by)
    }

    pub fn report(ledger: &Ledger, filter: &ReportFilter, group_by: GroupBy) -> Report {
        report::build_report(ledger.entries(), filter, group_by)
    }
}
