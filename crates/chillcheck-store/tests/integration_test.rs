// Integration tests for the store: everything goes through the public API,
// against a throwaway data directory
use chillcheck_core::models::{FridgeItem, HistoryAction, HistoryEntry};
use chillcheck_store::{FridgeStore, HISTORY_CAP};
use chrono::{Duration, NaiveDate, Utc};

fn temp_store() -> (tempfile::TempDir, FridgeStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = FridgeStore::new(dir.path());
    (dir, store)
}

#[test]
fn save_then_load_round_trips_records() {
    let (_dir, store) = temp_store();

    let items = vec![
        FridgeItem::new("Milk", 1)
            .with_category("Dairy")
            .with_expiration(NaiveDate::from_ymd_opt(2025, 7, 25).unwrap())
            .with_favorite(true),
        FridgeItem::new("Salt", 1),
    ];

    store.save_records(&items).unwrap();
    let loaded = store.load_records();
    assert_eq!(loaded, items);

    // Saving what was just loaded is idempotent
    store.save_records(&loaded).unwrap();
    assert_eq!(store.load_records(), items);
}

#[test]
fn history_is_capped_and_newest_first() {
    let (_dir, store) = temp_store();
    let item = FridgeItem::new("Milk", 1);
    let base = Utc::now();

    // Fill to the cap with increasing timestamps
    let entries: Vec<HistoryEntry> = (0..HISTORY_CAP)
        .map(|i| HistoryEntry::at(&item, HistoryAction::Added, base + Duration::seconds(i as i64)))
        .collect();
    store.save_history(&entries).unwrap();
    assert_eq!(store.load_history().len(), HISTORY_CAP);

    // The 101st append evicts exactly the oldest entry
    let oldest_id = entries[0].id;
    let newest = HistoryEntry::at(
        &item,
        HistoryAction::Updated,
        base + Duration::seconds(HISTORY_CAP as i64),
    );
    let newest_id = newest.id;
    store.append_entry(newest).unwrap();

    let history = store.load_history();
    assert_eq!(history.len(), HISTORY_CAP);
    assert_eq!(history[0].id, newest_id);
    assert!(history.iter().all(|e| e.id != oldest_id));
}

#[test]
fn history_loads_sorted_by_timestamp_descending() {
    let (_dir, store) = temp_store();
    let item = FridgeItem::new("Eggs", 12);
    let base = Utc::now();

    // Persist out of order
    let entries = vec![
        HistoryEntry::at(&item, HistoryAction::Added, base),
        HistoryEntry::at(&item, HistoryAction::Updated, base + Duration::minutes(5)),
        HistoryEntry::at(&item, HistoryAction::Removed, base + Duration::minutes(2)),
    ];
    store.save_history(&entries).unwrap();

    let history = store.load_history();
    assert_eq!(history[0].action, HistoryAction::Updated);
    assert_eq!(history[1].action, HistoryAction::Removed);
    assert_eq!(history[2].action, HistoryAction::Added);
}

#[test]
fn append_history_snapshots_the_item() {
    let (_dir, store) = temp_store();
    let mut item = FridgeItem::new("Cheese", 2);

    store.append_history(&item, HistoryAction::Added).unwrap();
    item.quantity = 50;
    store.append_history(&item, HistoryAction::Updated).unwrap();

    let history = store.load_history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].item.quantity, 50);
    assert_eq!(history[1].item.quantity, 2);
}

#[test]
fn delete_all_empties_records_but_history_remembers() {
    let (_dir, store) = temp_store();
    let items = vec![FridgeItem::new("Milk", 1), FridgeItem::new("Eggs", 12)];
    store.save_records(&items).unwrap();
    for item in &items {
        store.append_history(item, HistoryAction::Added).unwrap();
    }

    let deleted = store.delete_all_records().unwrap();
    assert_eq!(deleted, 2);
    assert!(store.load_records().is_empty());

    let history = store.load_history();
    let removed: Vec<_> = history
        .iter()
        .filter(|e| e.action == HistoryAction::Removed)
        .collect();
    assert_eq!(removed.len(), 2);
}

#[test]
fn clear_history_is_a_full_reset() {
    let (_dir, store) = temp_store();
    let item = FridgeItem::new("Milk", 1);
    store.append_history(&item, HistoryAction::Added).unwrap();
    assert_eq!(store.load_history().len(), 1);

    store.clear_history().unwrap();
    assert!(store.load_history().is_empty());
}

#[test]
fn stores_in_separate_dirs_do_not_interfere() {
    let (_dir_a, store_a) = temp_store();
    let (_dir_b, store_b) = temp_store();

    store_a.save_records(&[FridgeItem::new("Milk", 1)]).unwrap();
    assert!(store_b.load_records().is_empty());
}
