#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use budget_tracker::{
    config::AppConfig,
    core::{ExpenseFilter, ExpenseStore, FixedClock, Stores},
    domain::{Category, Expense, ExpensePatch, NewExpense, NewPredefinedExpense},
    errors::{BudgetError, Result},
    server::AppState,
    storage::{JsonStorage, MemoryStore},
};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use tempfile::TempDir;
use uuid::Uuid;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Clock pinned to the given calendar day.
pub fn clock_on(year: i32, month: u32, day: u32) -> FixedClock {
    FixedClock::on(NaiveDate::from_ymd_opt(year, month, day).expect("valid date"))
}

/// A JSON store in a fresh temporary directory.
pub fn json_storage(clock: FixedClock) -> (Arc<JsonStorage>, std::path::PathBuf) {
    let temp = TempDir::new().expect("create temp dir");
    let root = temp.path().join("data");
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    let storage = JsonStorage::open_with_clock(&root, Arc::new(clock)).expect("open json storage");
    (Arc::new(storage), root)
}

/// Handler state over an in-memory store with a fixed clock.
pub fn memory_state(clock: FixedClock) -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::with_clock(Arc::new(clock)));
    let state = AppState::new(
        Stores::from_backend(store.clone()),
        Arc::new(clock),
        AppConfig::default(),
    );
    (state, store)
}

pub fn template(title: &str, amount: f64, category: Category, day: u32) -> NewPredefinedExpense {
    NewPredefinedExpense::new(title, amount, category).with_day(day)
}

/// Which store call a [`FailingExpenseStore`] rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    Create,
    Lookup,
}

/// Delegates to an inner store but rejects one title on the chosen call.
pub struct FailingExpenseStore {
    inner: Arc<dyn ExpenseStore>,
    failing_title: String,
    fail_on: FailOn,
}

impl FailingExpenseStore {
    pub fn new(inner: Arc<dyn ExpenseStore>, failing_title: impl Into<String>) -> Self {
        Self::failing(inner, failing_title, FailOn::Create)
    }

    pub fn failing(
        inner: Arc<dyn ExpenseStore>,
        failing_title: impl Into<String>,
        fail_on: FailOn,
    ) -> Self {
        Self {
            inner,
            failing_title: failing_title.into(),
            fail_on,
        }
    }
}

impl ExpenseStore for FailingExpenseStore {
    fn find(&self, filter: &ExpenseFilter) -> Result<Vec<Expense>> {
        self.inner.find(filter)
    }

    fn find_one(&self, filter: &ExpenseFilter) -> Result<Option<Expense>> {
        if self.fail_on == FailOn::Lookup
            && filter.title.as_deref() == Some(self.failing_title.as_str())
        {
            return Err(BudgetError::StorageError("index unavailable".into()));
        }
        self.inner.find_one(filter)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Expense>> {
        self.inner.find_by_id(id)
    }

    fn create(&self, new: NewExpense) -> Result<Expense> {
        if self.fail_on == FailOn::Create && new.title == self.failing_title {
            return Err(BudgetError::StorageError("disk quota exceeded".into()));
        }
        self.inner.create(new)
    }

    fn update_by_id(&self, id: Uuid, patch: &ExpensePatch) -> Result<Option<Expense>> {
        self.inner.update_by_id(id, patch)
    }

    fn delete_by_id(&self, id: Uuid) -> Result<Option<Expense>> {
        self.inner.delete_by_id(id)
    }
}
