use chrono::Local;
use colored::Colorize;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::currency::MoneyFormat;
use crate::domain::{Entry, EntryDraft, EntryKind, DEFAULT_FORM_CATEGORY};

use super::{parse_amount_arg, parse_date_arg, ParsedArgs};

const NO_MATCH_MESSAGE: &str = "Tidak ada data cocok dengan pencarian.";
const PAID_LABEL: &str = "Sudah Dibayar";
const UNPAID_LABEL: &str = "Belum Dibayar";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add",
            "Tambah pemasukan atau pengeluaran",
            "add <nama> <income|expense> <nominal> [--date YYYY-MM-DD] [--category K] [--note C]",
            cmd_add,
        )
        .guarded(),
        CommandEntry::new(
            "edit",
            "Ubah data yang ada",
            "edit <id> [--name N] [--type T] [--amount A] [--date D] [--category K] [--note C]",
            cmd_edit,
        )
        .guarded(),
        CommandEntry::new(
            "toggle-paid",
            "Tandai data sudah/belum dibayar",
            "toggle-paid <id>",
            cmd_toggle_paid,
        )
        .guarded(),
        CommandEntry::new("delete", "Hapus data", "delete <id> [--yes]", cmd_delete).guarded(),
        CommandEntry::new(
            "list",
            "Daftar data, dicari berdasarkan nama",
            "list [kata kunci]",
            cmd_list,
        )
        .guarded(),
    ]
}

const FORM_OPTIONS: [&str; 3] = ["date", "category", "note"];
const EDIT_OPTIONS: [&str; 6] = ["name", "type", "amount", "date", "category", "note"];

fn parse_kind(raw: &str) -> Result<EntryKind, CommandError> {
    raw.parse::<EntryKind>()
        .map_err(|err| CommandError::InvalidArguments(err.to_string()))
}

/// Applies `--category`: a known choice selects it, anything else becomes a
/// custom category.
fn apply_category(context: &ShellContext, draft: EntryDraft, raw: &str) -> EntryDraft {
    let known = context.manager.ledger().categories(None);
    if known.iter().any(|category| category == raw) {
        draft.with_category(raw).with_custom_category("")
    } else {
        draft.with_custom_category(raw)
    }
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &FORM_OPTIONS, &[])?;
    let [name, kind, amount] = parsed.positional.as_slice() else {
        return Err(CommandError::InvalidArguments(
            "usage: add <nama> <income|expense> <nominal> [--date YYYY-MM-DD] [--category K] [--note C]"
                .into(),
        ));
    };

    let date = match parsed.option("date") {
        Some(raw) => parse_date_arg(raw)?,
        None => Local::now().date_naive(),
    };
    let mut draft = EntryDraft::new(*name, parse_kind(kind)?, parse_amount_arg(amount)?, date)
        .with_category(DEFAULT_FORM_CATEGORY);
    if let Some(raw) = parsed.option("category") {
        draft = apply_category(context, draft, raw);
    }
    if let Some(note) = parsed.option("note") {
        draft = draft.with_note(note);
    }

    let id = context.manager.add(draft)?;
    output::success(format!("Data tersimpan dengan ID {}.", id.short()));
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &EDIT_OPTIONS, &[])?;
    let [needle] = parsed.positional.as_slice() else {
        return Err(CommandError::InvalidArguments(
            "usage: edit <id> [--name N] [--type T] [--amount A] [--date D] [--category K] [--note C]"
                .into(),
        ));
    };
    let id = context.manager.resolve(needle)?;
    let current = context
        .manager
        .ledger()
        .entry(&id)
        .ok_or_else(|| CommandError::Message(format!("Data {} tidak ditemukan", id.short())))?;

    let mut draft = EntryDraft::from_entry(current);
    if let Some(name) = parsed.option("name") {
        draft.name = name.to_string();
    }
    if let Some(kind) = parsed.option("type") {
        draft.kind = parse_kind(kind)?;
    }
    if let Some(amount) = parsed.option("amount") {
        draft.amount = parse_amount_arg(amount)?;
    }
    if let Some(date) = parsed.option("date") {
        draft.date = parse_date_arg(date)?;
    }
    if let Some(note) = parsed.option("note") {
        draft.note = note.to_string();
    }
    if let Some(raw) = parsed.option("category") {
        draft = apply_category(context, draft, raw);
    }

    context.manager.update(&id, &draft)?;
    output::success(format!("Data {} diperbarui.", id.short()));
    Ok(())
}

fn cmd_toggle_paid(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [needle] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: toggle-paid <id>".into(),
        ));
    };
    let id = context.manager.resolve(needle)?;
    let paid = context.manager.toggle_paid(&id)?;
    output::success(format!("Data {}: {}.", id.short(), paid_label(paid)));
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &[], &["yes"])?;
    let [needle] = parsed.positional.as_slice() else {
        return Err(CommandError::InvalidArguments(
            "usage: delete <id> [--yes]".into(),
        ));
    };
    let id = context.manager.resolve(needle)?;
    let name = context
        .manager
        .ledger()
        .entry(&id)
        .map(|entry| entry.name.clone())
        .unwrap_or_default();
    if !context.confirm(&format!("Hapus data \"{name}\"?"), parsed.flag("yes"))? {
        output::info("Dibatalkan.");
        return Ok(());
    }
    let removed = context.manager.remove(&id)?;
    output::success(format!("Data \"{}\" dihapus.", removed.name));
    Ok(())
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let query = args.join(" ");
    let entries = context.manager.list(query.trim());
    if entries.is_empty() {
        output::info(NO_MATCH_MESSAGE);
        return Ok(());
    }
    output::raw(render_entries(&entries, &context.config.money_format()));
    Ok(())
}

pub(crate) fn paid_label(paid: bool) -> &'static str {
    if paid {
        PAID_LABEL
    } else {
        UNPAID_LABEL
    }
}

fn styled_amount(entry: &Entry, money: &MoneyFormat) -> String {
    let text = money.format(entry.amount);
    if entry.is_income() {
        text.green().to_string()
    } else {
        text.red().to_string()
    }
}

pub(crate) fn render_entries(entries: &[&Entry], money: &MoneyFormat) -> String {
    let mut table = Table::new(vec![
        TableColumn::left("ID"),
        TableColumn::left("Tanggal"),
        TableColumn::left("Nama").truncate_at(28),
        TableColumn::left("Jenis"),
        TableColumn::left("Kategori").truncate_at(20),
        TableColumn::right("Nominal"),
        TableColumn::left("Status"),
    ]);
    for entry in entries {
        table.push_row(vec![
            entry.id.short().to_string(),
            entry.date.format("%Y-%m-%d").to_string(),
            entry.name.clone(),
            entry.kind.label().to_string(),
            entry.category.clone(),
            styled_amount(entry, money),
            paid_label(entry.paid).to_string(),
        ]);
    }
    table.render()
}
