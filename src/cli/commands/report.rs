use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::currency::MoneyFormat;
use crate::report::{filter_entries, GroupBy, PaymentFilter, Report, ReportFilter};

use super::entry::render_entries;
use super::ParsedArgs;

const EMPTY_RANGE_MESSAGE: &str = "Tidak ada data pada rentang dan filter yang dipilih.";
const REPORT_USAGE: &str =
    "report [--by name|type] [--from YYYY-MM-DD] [--to YYYY-MM-DD] [--status all|paid|unpaid] [--entries] [--json]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "report",
        "Ringkasan pemasukan, pengeluaran, dan saldo",
        REPORT_USAGE,
        cmd_report,
    )
    .guarded()]
}

fn cmd_report(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &["by", "from", "to", "status"], &["json", "entries"])?;
    if !parsed.positional.is_empty() {
        return Err(CommandError::InvalidArguments(format!(
            "usage: {REPORT_USAGE}"
        )));
    }

    let group_by = match parsed.option("by") {
        Some(raw) => raw.parse::<GroupBy>()?,
        None => context.config.default_group_by,
    };
    let status = match parsed.option("status") {
        Some(raw) => raw.parse::<PaymentFilter>()?,
        None => PaymentFilter::All,
    };
    let filter = ReportFilter::new()
        .starting(parsed.option("from").unwrap_or(""))
        .ending(parsed.option("to").unwrap_or(""))
        .with_status(status);

    let report = context.manager.report(&filter, group_by);
    if parsed.flag("json") {
        output::raw(serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    output::section(format!("Laporan ({})", status.label()));
    let money = context.config.money_format();
    output::raw(render_totals(&report, &money));
    if report.rows.is_empty() {
        output::info(EMPTY_RANGE_MESSAGE);
        return Ok(());
    }
    output::raw(render_groups(&report, &money));

    if parsed.flag("entries") {
        let selected = filter_entries(context.manager.ledger().entries(), &filter);
        output::section("Rincian");
        output::raw(render_entries(&selected, &money));
    }
    Ok(())
}

fn render_totals(report: &Report, money: &MoneyFormat) -> String {
    let totals = &report.totals;
    format!(
        "Pemasukan   : {}\nPengeluaran : {}\nSaldo       : {}\nJumlah data : {}",
        money.format(totals.income),
        money.format(totals.expense),
        money.format(totals.balance),
        totals.count
    )
}

fn render_groups(report: &Report, money: &MoneyFormat) -> String {
    let mut table = Table::new(vec![
        TableColumn::left(report.group_by.header()).truncate_at(32),
        TableColumn::right("Jumlah"),
        TableColumn::right("Pemasukan"),
        TableColumn::right("Pengeluaran"),
        TableColumn::right("Saldo"),
    ]);
    for row in &report.rows {
        table.push_row(vec![
            row.key.clone(),
            row.count.to_string(),
            money.format(row.income),
            money.format(row.expense),
            money.format(row.balance),
        ]);
    }
    table.render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EntryDraft, EntryKind};
    use crate::report::build_report;
    use chrono::NaiveDate;

    fn sample_report(group_by: GroupBy) -> Report {
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let entries = vec![
            EntryDraft::new("Gaji", EntryKind::Income, 5_000_000.0, date)
                .into_entry()
                .unwrap(),
            EntryDraft::new("Kopi", EntryKind::Expense, 50_000.0, date)
                .into_entry()
                .unwrap(),
        ];
        build_report(&entries, &ReportFilter::new(), group_by)
    }

    #[test]
    fn totals_block_uses_rupiah() {
        let rendered = render_totals(&sample_report(GroupBy::Name), &MoneyFormat::default());
        assert!(rendered.contains("Pemasukan   : Rp 5.000.000"));
        assert!(rendered.contains("Pengeluaran : Rp 50.000"));
        assert!(rendered.contains("Saldo       : Rp 4.950.000"));
        assert!(rendered.contains("Jumlah data : 2"));
    }

    #[test]
    fn group_table_is_headed_by_grouping() {
        let by_type = render_groups(&sample_report(GroupBy::Type), &MoneyFormat::default());
        assert!(by_type.starts_with("Jenis"));
        let by_name = render_groups(&sample_report(GroupBy::Name), &MoneyFormat::default());
        let lines: Vec<&str> = by_name.lines().collect();
        assert!(lines[0].starts_with("Nama"));
        assert!(lines[2].starts_with("Gaji"));
        assert!(lines[3].contains("-Rp 50.000"));
    }

    #[test]
    fn totals_follow_configured_currency() {
        let money = MoneyFormat::new("en-US", "USD");
        let rendered = render_totals(&sample_report(GroupBy::Name), &money);
        assert!(rendered.contains("Saldo       : $ 4,950,000"));
    }
}
