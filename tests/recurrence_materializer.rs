mod common;

use std::sync::Arc;

use budget_tracker::{
    core::{
        services::{FailureKind, RecurrenceService, TemplateSelection, ALREADY_EXISTS},
        Clock, ExpenseFilter, ExpenseStore, PredefinedExpenseStore,
    },
    domain::{Category, EntryType, NewExpense},
    errors::BudgetError,
    storage::MemoryStore,
};
use common::{clock_on, template, FailOn, FailingExpenseStore};

fn all_expenses(store: &dyn ExpenseStore) -> Vec<budget_tracker::domain::Expense> {
    store.find(&ExpenseFilter::default()).unwrap()
}

#[test]
fn applying_a_month_twice_creates_once() {
    let store = MemoryStore::new();
    let clock = clock_on(2025, 3, 10);
    PredefinedExpenseStore::create(&store, template("Rent", 1200.0, Category::Rent, 1)).unwrap();
    let service = RecurrenceService::new(&store, &store, &clock);

    let first = service
        .apply_to_month("2025-03", &TemplateSelection::AllActive)
        .unwrap();
    assert_eq!(first.created.len(), 1);
    assert!(first.errors.is_empty());
    assert_eq!(first.created[0].date, "2025-03-01");

    let second = service
        .apply_to_month("2025-03", &TemplateSelection::AllActive)
        .unwrap();
    assert!(second.created.is_empty());
    assert_eq!(second.errors.len(), 1);
    assert_eq!(second.errors[0].reason, ALREADY_EXISTS);
    assert_eq!(second.errors[0].kind, FailureKind::AlreadyExists);
    assert_eq!(all_expenses(&store).len(), 1);
}

#[test]
fn malformed_months_fail_without_writes() {
    let store = MemoryStore::new();
    let clock = clock_on(2025, 3, 10);
    PredefinedExpenseStore::create(&store, template("Rent", 1200.0, Category::Rent, 1)).unwrap();
    let service = RecurrenceService::new(&store, &store, &clock);

    for month in ["2025-13", "bad", "2025-3", ""] {
        let err = service
            .apply_to_month(month, &TemplateSelection::AllActive)
            .unwrap_err();
        assert!(matches!(err, BudgetError::InvalidInput(_)), "{month}");
    }
    assert!(all_expenses(&store).is_empty());
}

#[test]
fn day_of_month_is_not_clamped_to_month_length() {
    let store = MemoryStore::new();
    let clock = clock_on(2025, 1, 1);
    PredefinedExpenseStore::create(&store, template("Gym", 45.0, Category::Healthcare, 31))
        .unwrap();
    let service = RecurrenceService::new(&store, &store, &clock);

    let applied = service
        .apply_to_month("2025-02", &TemplateSelection::AllActive)
        .unwrap();
    assert_eq!(applied.created[0].date, "2025-02-31");
}

#[test]
fn manually_entered_equivalent_expense_is_detected() {
    let store = MemoryStore::new();
    let clock = clock_on(2025, 4, 2);
    PredefinedExpenseStore::create(&store, template("Internet", 60.0, Category::Bills, 15))
        .unwrap();
    ExpenseStore::create(
        &store,
        NewExpense {
            title: "Internet".into(),
            amount: 60.0,
            category: Category::Bills,
            date: "2025-04-03".into(),
            kind: EntryType::Expense,
        },
    )
    .unwrap();
    let service = RecurrenceService::new(&store, &store, &clock);

    let applied = service
        .apply_to_month("2025-04", &TemplateSelection::AllActive)
        .unwrap();
    assert!(applied.created.is_empty());
    assert_eq!(applied.skipped(), 1);
}

#[test]
fn entry_type_takes_part_in_equivalence() {
    let store = MemoryStore::new();
    let clock = clock_on(2025, 4, 2);
    PredefinedExpenseStore::create(
        &store,
        template("Freelance", 800.0, Category::Other, 20).with_kind(EntryType::Income),
    )
    .unwrap();
    ExpenseStore::create(
        &store,
        NewExpense {
            title: "Freelance".into(),
            amount: 800.0,
            category: Category::Other,
            date: "2025-04-20".into(),
            kind: EntryType::Expense,
        },
    )
    .unwrap();
    let service = RecurrenceService::new(&store, &store, &clock);

    let applied = service
        .apply_to_month("2025-04", &TemplateSelection::AllActive)
        .unwrap();
    assert_eq!(applied.created.len(), 1);
    assert_eq!(applied.created[0].kind, EntryType::Income);
}

#[test]
fn created_expenses_are_stamped_by_the_store_clock() {
    let clock = clock_on(2025, 8, 12);
    let store = MemoryStore::with_clock(Arc::new(clock));
    PredefinedExpenseStore::create(&store, template("Rent", 1200.0, Category::Rent, 1)).unwrap();
    let service = RecurrenceService::new(&store, &store, &clock);

    let applied = service
        .apply_to_month("2025-08", &TemplateSelection::AllActive)
        .unwrap();
    assert_eq!(applied.created[0].created_at, clock.now());
    assert_eq!(applied.created[0].updated_at, clock.now());
}

#[test]
fn explicit_selection_still_skips_inactive_templates() {
    let store = MemoryStore::new();
    let clock = clock_on(2025, 5, 1);
    let active =
        PredefinedExpenseStore::create(&store, template("Rent", 1200.0, Category::Rent, 1))
            .unwrap();
    let paused = PredefinedExpenseStore::create(
        &store,
        template("Tuition", 300.0, Category::Education, 5).inactive(),
    )
    .unwrap();
    PredefinedExpenseStore::create(&store, template("Loan", 250.0, Category::Loan, 10)).unwrap();
    let service = RecurrenceService::new(&store, &store, &clock);

    let selection = TemplateSelection::Ids(vec![active.id, paused.id]);
    let applied = service.apply_to_month("2025-05", &selection).unwrap();
    let titles: Vec<_> = applied.created.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Rent"]);
}

#[test]
fn one_failing_template_does_not_abort_the_batch() {
    let backend = Arc::new(MemoryStore::new());
    let clock = clock_on(2025, 6, 1);
    for (title, category) in [
        ("Rent", Category::Rent),
        ("Electricity", Category::Bills),
        ("Netflix", Category::Entertainment),
    ] {
        PredefinedExpenseStore::create(backend.as_ref(), template(title, 20.0, category, 3))
            .unwrap();
    }
    let expenses = FailingExpenseStore::new(backend.clone(), "Electricity");
    let service = RecurrenceService::new(backend.as_ref(), &expenses, &clock);

    let applied = service
        .apply_to_month("2025-06", &TemplateSelection::AllActive)
        .unwrap();
    assert_eq!(applied.created.len(), 2);
    assert_eq!(applied.errors.len(), 1);
    assert_eq!(applied.errors[0].template, "Electricity");
    assert_eq!(applied.errors[0].kind, FailureKind::Store);
    assert_eq!(all_expenses(backend.as_ref()).len(), 2);
}

#[test]
fn failed_existence_lookup_is_recorded_and_batch_continues() {
    let backend = Arc::new(MemoryStore::new());
    let clock = clock_on(2025, 6, 1);
    for (title, category) in [
        ("Rent", Category::Rent),
        ("Insurance", Category::Bills),
        ("Spotify", Category::Entertainment),
    ] {
        PredefinedExpenseStore::create(backend.as_ref(), template(title, 15.0, category, 4))
            .unwrap();
    }
    let expenses = FailingExpenseStore::failing(backend.clone(), "Insurance", FailOn::Lookup);
    let service = RecurrenceService::new(backend.as_ref(), &expenses, &clock);

    let applied = service
        .apply_to_month("2025-06", &TemplateSelection::AllActive)
        .unwrap();
    let titles: Vec<_> = applied.created.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Rent", "Spotify"]);
    assert_eq!(applied.errors.len(), 1);
    assert_eq!(applied.errors[0].template, "Insurance");
    assert_eq!(applied.errors[0].kind, FailureKind::Store);
    assert_eq!(
        applied.errors[0].reason,
        "Persistence error: index unavailable"
    );
    assert_eq!(all_expenses(backend.as_ref()).len(), 2);
}

#[test]
fn range_rejects_start_before_current_month() {
    let store = MemoryStore::new();
    let clock = clock_on(2025, 3, 31);
    let service = RecurrenceService::new(&store, &store, &clock);

    let err = service
        .apply_to_range(Some("2025-02"), None, &TemplateSelection::AllActive)
        .unwrap_err();
    assert!(matches!(
        err,
        BudgetError::InvalidInput(ref m) if m == "Start month cannot be in the past"
    ));

    let current = service
        .apply_to_range(Some("2025-03"), Some("2025-03"), &TemplateSelection::AllActive)
        .unwrap();
    assert_eq!(current.total_months, 1);
}

#[test]
fn long_range_is_truncated_to_twenty_four_months() {
    let store = MemoryStore::new();
    let clock = clock_on(2025, 1, 1);
    PredefinedExpenseStore::create(&store, template("Rent", 1200.0, Category::Rent, 1)).unwrap();
    let service = RecurrenceService::new(&store, &store, &clock);

    let result = service
        .apply_to_range(Some("2025-01"), Some("2050-01"), &TemplateSelection::AllActive)
        .unwrap();
    assert_eq!(result.total_months, 24);
    assert_eq!(result.total_created, 24);
    assert_eq!(result.months_processed.first().unwrap().month.to_string(), "2025-01");
    assert_eq!(result.months_processed.last().unwrap().month.to_string(), "2026-12");
    assert_eq!(all_expenses(&store).len(), 24);
}

#[test]
fn range_counts_store_failures_as_skipped_and_reports_them() {
    let backend = Arc::new(MemoryStore::new());
    let clock = clock_on(2025, 6, 1);
    PredefinedExpenseStore::create(backend.as_ref(), template("Rent", 900.0, Category::Rent, 1))
        .unwrap();
    PredefinedExpenseStore::create(backend.as_ref(), template("Water", 30.0, Category::Bills, 8))
        .unwrap();
    let expenses = FailingExpenseStore::new(backend.clone(), "Water");
    let service = RecurrenceService::new(backend.as_ref(), &expenses, &clock);

    let result = service
        .apply_to_range(Some("2025-06"), Some("2025-08"), &TemplateSelection::AllActive)
        .unwrap();
    assert_eq!(result.total_months, 3);
    assert_eq!(result.total_created, 3);
    assert!(result
        .months_processed
        .iter()
        .all(|month| month.created == 1 && month.skipped == 1));
    assert_eq!(result.errors.len(), 3);
    assert_eq!(result.errors[0].template, "Water");
    assert_eq!(result.errors[0].message, "Persistence error: disk quota exceeded");
}

#[test]
fn end_before_start_processes_nothing() {
    let store = MemoryStore::new();
    let clock = clock_on(2025, 1, 1);
    PredefinedExpenseStore::create(&store, template("Rent", 1200.0, Category::Rent, 1)).unwrap();
    let service = RecurrenceService::new(&store, &store, &clock);

    let result = service
        .apply_to_range(Some("2025-06"), Some("2025-02"), &TemplateSelection::AllActive)
        .unwrap();
    assert_eq!(result.total_months, 0);
    assert!(all_expenses(&store).is_empty());
}
