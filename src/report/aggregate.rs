//! Totals and grouped breakdowns over a filtered entry set.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::{Entry, EntryKind};

use super::filter::{GroupBy, ReportFilter};

/// Key used for entries without a name when grouping by name.
pub const UNNAMED_LABEL: &str = "(Tanpa Nama)";

/// Grand totals for the filtered set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    pub income: i64,
    pub expense: i64,
    pub balance: i64,
    pub count: usize,
}

/// One line of the grouped breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupRow {
    pub key: String,
    pub count: usize,
    pub income: i64,
    pub expense: i64,
    pub balance: i64,
}

impl GroupRow {
    fn new(key: String) -> Self {
        Self {
            key,
            count: 0,
            income: 0,
            expense: 0,
            balance: 0,
        }
    }
}

/// Totals and grouped rows computed from the same filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub group_by: GroupBy,
    pub totals: Totals,
    pub rows: Vec<GroupRow>,
}

/// Entries passing every criterion of `filter`, in collection order.
pub fn filter_entries<'a>(entries: &'a [Entry], filter: &ReportFilter) -> Vec<&'a Entry> {
    entries.iter().filter(|entry| filter.matches(entry)).collect()
}

pub fn compute_totals(entries: &[Entry], filter: &ReportFilter) -> Totals {
    totals_of(filter_entries(entries, filter))
}

/// Groups the filtered entries and sorts rows by balance, highest first.
/// Rows with equal balance keep the order in which their key first appeared.
pub fn compute_grouped_report(
    entries: &[Entry],
    filter: &ReportFilter,
    group_by: GroupBy,
) -> Vec<GroupRow> {
    group_rows(filter_entries(entries, filter), group_by)
}

pub fn build_report(entries: &[Entry], filter: &ReportFilter, group_by: GroupBy) -> Report {
    let selected = filter_entries(entries, filter);
    Report {
        group_by,
        totals: totals_of(selected.iter().copied()),
        rows: group_rows(selected, group_by),
    }
}

fn group_key(entry: &Entry, group_by: GroupBy) -> String {
    match group_by {
        GroupBy::Name if entry.name.is_empty() => UNNAMED_LABEL.to_string(),
        GroupBy::Name => entry.name.clone(),
        GroupBy::Type => entry.kind.label().to_string(),
    }
}

fn totals_of<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> Totals {
    let mut totals = Totals::default();
    for entry in entries {
        match entry.kind {
            EntryKind::Income => totals.income = totals.income.saturating_add(entry.amount),
            EntryKind::Expense => totals.expense = totals.expense.saturating_add(entry.amount),
        }
        totals.count += 1;
    }
    totals.balance = totals.income.saturating_sub(totals.expense);
    totals
}

fn group_rows<'a>(entries: impl IntoIterator<Item = &'a Entry>, group_by: GroupBy) -> Vec<GroupRow> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<GroupRow> = Vec::new();

    for entry in entries {
        let key = group_key(entry, group_by);
        let slot = match index.get(&key) {
            Some(&slot) => slot,
            None => {
                rows.push(GroupRow::new(key.clone()));
                index.insert(key, rows.len() - 1);
                rows.len() - 1
            }
        };
        let row = &mut rows[slot];
        match entry.kind {
            EntryKind::Income => row.income = row.income.saturating_add(entry.amount),
            EntryKind::Expense => row.expense = row.expense.saturating_add(entry.amount),
        }
        row.count += 1;
    }

    for row in &mut rows {
        row.balance = row.income.saturating_sub(row.expense);
    }
    // `sort_by` is stable, so ties keep first-encountered order.
    rows.sort_by(|a, b| b.balance.cmp(&a.balance));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntryId;
    use crate::report::PaymentFilter;
    use chrono::NaiveDate;

    fn entry(name: &str, kind: EntryKind, amount: i64, day: u32, paid: bool) -> Entry {
        Entry {
            id: EntryId::generate(),
            name: name.into(),
            kind,
            amount,
            category: String::new(),
            note: String::new(),
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            paid,
        }
    }

    #[test]
    fn empty_name_uses_placeholder_key() {
        let entries = vec![entry("", EntryKind::Expense, 10, 1, false)];
        let rows = compute_grouped_report(&entries, &ReportFilter::new(), GroupBy::Name);
        assert_eq!(rows[0].key, UNNAMED_LABEL);
    }

    #[test]
    fn names_are_not_normalized() {
        let entries = vec![
            entry("Gaji", EntryKind::Income, 10, 1, false),
            entry("gaji ", EntryKind::Income, 10, 2, false),
        ];
        let rows = compute_grouped_report(&entries, &ReportFilter::new(), GroupBy::Name);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn ties_keep_first_encountered_order() {
        let entries = vec![
            entry("B", EntryKind::Income, 100, 1, false),
            entry("A", EntryKind::Income, 100, 2, false),
            entry("C", EntryKind::Income, 300, 3, false),
            entry("B", EntryKind::Expense, 0, 4, false),
        ];
        let rows = compute_grouped_report(&entries, &ReportFilter::new(), GroupBy::Name);
        let keys: Vec<_> = rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, ["C", "B", "A"]);
        assert_eq!(rows[1].count, 2);
    }

    #[test]
    fn mixed_group_accumulates_both_sides() {
        let entries = vec![
            entry("Warung", EntryKind::Income, 700, 1, true),
            entry("Warung", EntryKind::Expense, 200, 2, false),
        ];
        let rows = compute_grouped_report(&entries, &ReportFilter::new(), GroupBy::Name);
        assert_eq!(
            rows,
            vec![GroupRow {
                key: "Warung".into(),
                count: 2,
                income: 700,
                expense: 200,
                balance: 500,
            }]
        );
    }

    #[test]
    fn build_report_matches_separate_queries() {
        let entries = vec![
            entry("Gaji", EntryKind::Income, 1_000, 1, true),
            entry("Sewa", EntryKind::Expense, 400, 2, true),
            entry("Kopi", EntryKind::Expense, 25, 3, false),
        ];
        let filter = ReportFilter::new().with_status(PaymentFilter::Paid);
        let report = build_report(&entries, &filter, GroupBy::Type);
        assert_eq!(report.totals, compute_totals(&entries, &filter));
        assert_eq!(
            report.rows,
            compute_grouped_report(&entries, &filter, GroupBy::Type)
        );
        assert_eq!(report.totals.balance, 600);
    }
}
