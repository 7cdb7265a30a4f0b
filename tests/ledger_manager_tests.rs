mod common;

use catatan_core::core::ledger_manager::LedgerManager;
use catatan_core::domain::{EntryDraft, EntryKind, DEFAULT_CATEGORIES};
use catatan_core::errors::LedgerError;
use catatan_core::report::{GroupBy, PaymentFilter, ReportFilter};
use catatan_core::storage::JsonEntryStore;
use common::{date, setup_json_manager};

fn reopen(root: &std::path::Path) -> LedgerManager {
    LedgerManager::open(Box::new(JsonEntryStore::in_dir(root, 3).unwrap()))
}

#[test]
fn entries_survive_reopening() {
    let (temp, mut manager) = setup_json_manager(3);
    let gaji = manager
        .add(EntryDraft::new("Gaji", EntryKind::Income, 5_000_000.0, date(2024, 1, 1)).with_category("Gaji"))
        .unwrap();
    manager
        .add(
            EntryDraft::new("Makan", EntryKind::Expense, 50_000.0, date(2024, 1, 2))
                .with_note("  warteg  "),
        )
        .unwrap();
    manager.toggle_paid(&gaji).unwrap();

    let reopened = reopen(temp.path());
    let entries = reopened.ledger().entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name, "Makan");
    assert_eq!(entries[0].note, "warteg");
    assert!(entries[1].paid);

    let unpaid = reopened.report(
        &ReportFilter::new().with_status(PaymentFilter::Unpaid),
        GroupBy::Type,
    );
    assert_eq!(unpaid.totals.count, 1);
    assert_eq!(unpaid.rows[0].key, "Pengeluaran");
}

#[test]
fn edit_replaces_fields_but_keeps_identity() {
    let (temp, mut manager) = setup_json_manager(3);
    let id = manager
        .add(EntryDraft::new("Listrik", EntryKind::Expense, 200_000.0, date(2024, 2, 1)))
        .unwrap();
    manager.toggle_paid(&id).unwrap();

    let current = manager.ledger().entry(&id).unwrap().clone();
    let mut draft = EntryDraft::from_entry(&current).with_custom_category("Utilitas");
    draft.amount = 215_000.0;
    draft.date = date(2024, 2, 3);
    manager.update(&id, &draft).unwrap();

    let reopened = reopen(temp.path());
    let entry = reopened.ledger().entry(&id).unwrap();
    assert_eq!(entry.amount, 215_000);
    assert_eq!(entry.category, "Utilitas");
    assert_eq!(entry.date, date(2024, 2, 3));
    assert!(entry.paid);
    assert!(reopened
        .ledger()
        .categories(None)
        .contains(&"Utilitas".to_string()));
}

#[test]
fn delete_removes_from_disk() {
    let (temp, mut manager) = setup_json_manager(3);
    let id = manager
        .add(EntryDraft::new("Parkir", EntryKind::Expense, 3_000.0, date(2024, 2, 1)))
        .unwrap();
    manager.remove(&id).unwrap();
    assert!(reopen(temp.path()).ledger().is_empty());
    assert!(manager.toggle_paid(&id).is_err());
}

#[test]
fn list_searches_names_newest_first() {
    let (_temp, mut manager) = setup_json_manager(3);
    for (name, day) in [("Makan pagi", 3), ("Bensin", 5), ("makan malam", 7)] {
        manager
            .add(EntryDraft::new(name, EntryKind::Expense, 10_000.0, date(2024, 4, day)))
            .unwrap();
    }
    let names: Vec<&str> = manager
        .list("MAKAN")
        .into_iter()
        .map(|entry| entry.name.as_str())
        .collect();
    assert_eq!(names, vec!["makan malam", "Makan pagi"]);
    assert_eq!(manager.list("").len(), 3);
    assert!(manager.list("gaji").is_empty());
}

#[test]
fn ambiguous_and_unknown_prefixes_are_rejected() {
    let (_temp, manager) = setup_json_manager(3);
    assert!(matches!(
        manager.resolve("zzzz"),
        Err(LedgerError::UnknownId(_))
    ));
    assert!(matches!(manager.resolve(""), Err(LedgerError::UnknownId(_))));
}

#[test]
fn category_list_starts_with_defaults() {
    let (_temp, manager) = setup_json_manager(3);
    let categories = manager.ledger().categories(Some("  "));
    assert_eq!(categories, DEFAULT_CATEGORIES.map(String::from).to_vec());
}
