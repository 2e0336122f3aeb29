use pocketledger_core::{
    EntryError, EntryService, Expense, ExpenseInput, ExpenseRepository, ExpenseValidationError,
    JsonExpenseRepository, KeyValueStore, LoadState, MemoryKeyValueStore, EXPENSES_KEY,
};

fn input(name: &str, category: &str, date: &str, amount: &str) -> ExpenseInput {
    ExpenseInput {
        name: name.to_string(),
        category: category.to_string(),
        date: date.to_string(),
        amount: amount.to_string(),
    }
}

fn service_over(
    store: &MemoryKeyValueStore,
) -> EntryService<JsonExpenseRepository<&MemoryKeyValueStore>> {
    let mut service = EntryService::new(JsonExpenseRepository::new(store));
    service.hydrate();
    service
}

fn stored_records(store: &MemoryKeyValueStore) -> Vec<Expense> {
    match store.get(EXPENSES_KEY).unwrap() {
        Some(json) => serde_json::from_str(&json).unwrap(),
        None => Vec::new(),
    }
}

#[test]
fn add_then_delete_scenario_matches_expected_totals() {
    let store = MemoryKeyValueStore::new();
    let mut service = service_over(&store);

    let coffee = service
        .add_expense(&input("Coffee", "Food", "2025-06-01", "4.50"))
        .unwrap();
    assert!(coffee.persisted);
    let bus = service
        .add_expense(&input("Bus", "Transport", "2025-06-02", "2"))
        .unwrap();

    assert_eq!(stored_records(&store).len(), 2);
    assert_eq!(service.total(), 6.5);

    let outcome = service.delete_expense(&coffee.id);
    assert!(outcome.removed);
    assert!(outcome.persisted);

    let remaining = stored_records(&store);
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].name, "Bus");
    assert_eq!(remaining[0].id, bus.id);
    assert_eq!(service.total(), 2.0);
}

#[test]
fn add_persists_inputs_exactly() {
    let store = MemoryKeyValueStore::new();
    let mut service = service_over(&store);

    let outcome = service
        .add_expense(&input("Coffee", "Food", "2025-06-01", "4.50"))
        .unwrap();

    let stored = stored_records(&store);
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, outcome.id);
    assert_eq!(stored[0].name, "Coffee");
    assert_eq!(stored[0].category, "Food");
    assert_eq!(stored[0].date, "2025-06-01");
    assert_eq!(stored[0].amount, 4.5);
}

#[test]
fn empty_field_aborts_before_any_write() {
    let store = MemoryKeyValueStore::new();
    let mut service = service_over(&store);

    let err = service
        .add_expense(&input("Coffee", "", "2025-06-01", "4.50"))
        .unwrap_err();

    assert_eq!(
        err,
        EntryError::Validation(ExpenseValidationError::EmptyCategory)
    );
    assert_eq!(store.write_count(), 0);
    assert!(service.expenses().is_empty());
    assert!(stored_records(&store).is_empty());
}

#[test]
fn non_numeric_amount_is_rejected_at_entry() {
    let store = MemoryKeyValueStore::new();
    let mut service = service_over(&store);

    let err = service
        .add_expense(&input("Coffee", "Food", "2025-06-01", "four"))
        .unwrap_err();

    assert!(matches!(err, EntryError::Amount(_)));
    assert_eq!(store.write_count(), 0);
    assert!(service.expenses().is_empty());
}

#[test]
fn delete_missing_id_still_saves_the_unchanged_snapshot() {
    let store = MemoryKeyValueStore::new();
    let mut service = service_over(&store);
    service
        .add_expense(&input("Coffee", "Food", "2025-06-01", "4.50"))
        .unwrap();
    let writes_before = store.write_count();

    let outcome = service.delete_expense("no-such-id");

    assert!(!outcome.removed);
    assert!(outcome.persisted);
    assert_eq!(store.write_count(), writes_before + 1);
    assert_eq!(stored_records(&store).len(), 1);
}

#[test]
fn delete_preserves_relative_order_of_survivors() {
    let store = MemoryKeyValueStore::new();
    let mut service = service_over(&store);
    let a = service
        .add_expense(&input("A", "x", "2025-06-01", "1"))
        .unwrap();
    let b = service
        .add_expense(&input("B", "x", "2025-06-02", "1"))
        .unwrap();
    let c = service
        .add_expense(&input("C", "x", "2025-06-03", "1"))
        .unwrap();

    service.delete_expense(&b.id);

    let stored = stored_records(&store);
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].id, a.id);
    assert_eq!(stored[1].id, c.id);
}

#[test]
fn save_failure_is_fire_and_forget() {
    let store = MemoryKeyValueStore::new();
    let mut service = service_over(&store);
    store.fail_writes(true);

    let outcome = service
        .add_expense(&input("Coffee", "Food", "2025-06-01", "4.50"))
        .unwrap();

    assert!(!outcome.persisted);
    assert_eq!(service.expenses().len(), 1);
    assert!(stored_records(&store).is_empty());

    // The next successful write carries the cumulative in-memory snapshot.
    store.fail_writes(false);
    let second = service
        .add_expense(&input("Bus", "Transport", "2025-06-02", "2"))
        .unwrap();

    assert!(second.persisted);
    assert_eq!(stored_records(&store).len(), 2);
}

#[test]
fn hydrate_failure_degrades_to_empty_list_and_recovers_on_remount() {
    let store = MemoryKeyValueStore::new();
    JsonExpenseRepository::new(&store)
        .replace_all(&[Expense::with_id("1", "Tea", "Food", "2025-06-03", 1.5)])
        .unwrap();

    store.fail_reads(true);
    let mut service = EntryService::new(JsonExpenseRepository::new(&store));
    service.hydrate();
    assert_eq!(service.state(), LoadState::LoadFailed);
    assert!(service.expenses().is_empty());

    store.fail_reads(false);
    service.hydrate();
    assert_eq!(service.state(), LoadState::Loaded);
    assert_eq!(service.expenses().len(), 1);
}

#[test]
fn hydrate_replaces_the_working_set_wholesale() {
    let store = MemoryKeyValueStore::new();
    let mut writer = service_over(&store);
    writer
        .add_expense(&input("Coffee", "Food", "2025-06-01", "4.50"))
        .unwrap();

    // A second mount over the same store adopts the persisted snapshot.
    let reader = service_over(&store);
    assert_eq!(reader.expenses().len(), 1);
    assert_eq!(reader.expenses()[0].name, "Coffee");
    assert_eq!(reader.state(), LoadState::Loaded);
}

#[test]
fn total_treats_legacy_non_numeric_amounts_as_zero() {
    let store = MemoryKeyValueStore::new();
    store
        .set(
            EXPENSES_KEY,
            r#"[
                {"id": "1", "name": "a", "category": "c", "date": "2025-01-01", "amount": 10},
                {"id": "2", "name": "b", "category": "c", "date": "2025-01-02", "amount": "bad"},
                {"id": "3", "name": "c", "category": "c", "date": "2025-01-03", "amount": 5.5}
            ]"#,
        )
        .unwrap();

    let service = service_over(&store);

    assert_eq!(service.total(), 15.5);
    // The stored record keeps its non-numeric amount; only the total
    // coerces it.
    assert!(service.expenses()[1].amount.is_nan());
}
