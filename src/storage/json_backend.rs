use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard},
};

use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::core::storage::{
    ExpenseFilter, ExpenseStore, PredefinedExpenseFilter, PredefinedExpenseStore, SalaryStore,
};
use crate::core::time::{Clock, SystemClock};
use crate::domain::{
    Expense, ExpensePatch, Month, NewExpense, NewPredefinedExpense, PredefinedExpense,
    PredefinedExpensePatch, Salary,
};
use crate::errors::{BudgetError, Result};
use crate::utils::ensure_dir;

use super::collections::{CollectionKind, Collections};

const TMP_SUFFIX: &str = "tmp";

/// Document store keeping one JSON file per collection under a data directory.
///
/// Collections are loaded on [`JsonStorage::open`] and every mutation is written through
/// before it is acknowledged. If the write fails the in-memory change is rolled back.
#[derive(Debug)]
pub struct JsonStorage {
    root: PathBuf,
    data: Mutex<Collections>,
    clock: Arc<dyn Clock>,
}

impl JsonStorage {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        Self::open_with_clock(root, Arc::new(SystemClock))
    }

    /// Opens the store, stamping record timestamps from `clock`.
    pub fn open_with_clock(root: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Result<Self> {
        let root = root.into();
        ensure_dir(&root)?;
        let data = Collections {
            expenses: load_collection(&root.join(CollectionKind::Expenses.file_name()))?,
            predefined: load_collection(
                &root.join(CollectionKind::PredefinedExpenses.file_name()),
            )?,
            salaries: load_collection(&root.join(CollectionKind::Salaries.file_name()))?,
        };
        tracing::info!(
            root = %root.display(),
            expenses = data.expenses.len(),
            predefined = data.predefined.len(),
            salaries = data.salaries.len(),
            "json storage opened"
        );
        Ok(Self {
            root,
            data: Mutex::new(data),
            clock,
        })
    }

    pub fn collection_path(&self, kind: CollectionKind) -> PathBuf {
        self.root.join(kind.file_name())
    }

    /// Writes every collection to disk. Called once at shutdown.
    pub fn close(&self) -> Result<()> {
        let data = self.lock()?;
        for kind in CollectionKind::ALL {
            self.persist(&data, kind)?;
        }
        tracing::info!(root = %self.root.display(), "json storage closed");
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Collections>> {
        self.data
            .lock()
            .map_err(|_| BudgetError::StorageError("json storage lock poisoned".into()))
    }

    fn mutate<T, F>(&self, kind: CollectionKind, op: F) -> Result<T>
    where
        F: FnOnce(&mut Collections) -> Result<T>,
    {
        let mut data = self.lock()?;
        let snapshot = data.clone();
        let value = op(&mut data)?;
        if let Err(err) = self.persist(&data, kind) {
            *data = snapshot;
            return Err(err);
        }
        Ok(value)
    }

    fn persist(&self, data: &Collections, kind: CollectionKind) -> Result<()> {
        let json = match kind {
            CollectionKind::Expenses => serde_json::to_string_pretty(&data.expenses)?,
            CollectionKind::PredefinedExpenses => serde_json::to_string_pretty(&data.predefined)?,
            CollectionKind::Salaries => serde_json::to_string_pretty(&data.salaries)?,
        };
        let path = self.collection_path(kind);
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &path)?;
        tracing::debug!(path = %path.display(), "collection persisted");
        Ok(())
    }
}

impl ExpenseStore for JsonStorage {
    fn find(&self, filter: &ExpenseFilter) -> Result<Vec<Expense>> {
        Ok(self.lock()?.find_expenses(filter))
    }

    fn find_one(&self, filter: &ExpenseFilter) -> Result<Option<Expense>> {
        Ok(self.lock()?.find_one_expense(filter))
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Expense>> {
        Ok(self.lock()?.expense(id))
    }

    fn create(&self, new: NewExpense) -> Result<Expense> {
        self.mutate(CollectionKind::Expenses, |data| {
            Ok(data.insert_expense(new, self.clock.now()))
        })
    }

    fn update_by_id(&self, id: Uuid, patch: &ExpensePatch) -> Result<Option<Expense>> {
        self.mutate(CollectionKind::Expenses, |data| {
            data.update_expense(id, patch, self.clock.now())
        })
    }

    fn delete_by_id(&self, id: Uuid) -> Result<Option<Expense>> {
        self.mutate(CollectionKind::Expenses, |data| Ok(data.remove_expense(id)))
    }
}

impl PredefinedExpenseStore for JsonStorage {
    fn find(&self, filter: &PredefinedExpenseFilter) -> Result<Vec<PredefinedExpense>> {
        Ok(self.lock()?.find_predefined(filter))
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<PredefinedExpense>> {
        Ok(self.lock()?.predefined(id))
    }

    fn create(&self, new: NewPredefinedExpense) -> Result<PredefinedExpense> {
        self.mutate(CollectionKind::PredefinedExpenses, |data| {
            Ok(data.insert_predefined(new, self.clock.now()))
        })
    }

    fn update_by_id(
        &self,
        id: Uuid,
        patch: &PredefinedExpensePatch,
    ) -> Result<Option<PredefinedExpense>> {
        self.mutate(CollectionKind::PredefinedExpenses, |data| {
            data.update_predefined(id, patch, self.clock.now())
        })
    }

    fn delete_by_id(&self, id: Uuid) -> Result<Option<PredefinedExpense>> {
        self.mutate(CollectionKind::PredefinedExpenses, |data| {
            Ok(data.remove_predefined(id))
        })
    }
}

impl SalaryStore for JsonStorage {
    fn list(&self) -> Result<Vec<Salary>> {
        Ok(self.lock()?.salaries_newest_first())
    }

    fn find_by_month(&self, month: Month) -> Result<Option<Salary>> {
        Ok(self.lock()?.salary(month))
    }

    fn upsert(&self, month: Month, amount: f64) -> Result<Salary> {
        self.mutate(CollectionKind::Salaries, |data| {
            Ok(data.upsert_salary(month, amount, self.clock.now()))
        })
    }

    fn update_amount(&self, month: Month, amount: f64) -> Result<Option<Salary>> {
        self.mutate(CollectionKind::Salaries, |data| {
            Ok(data.update_salary(month, amount, self.clock.now()))
        })
    }

    fn delete_by_month(&self, month: Month) -> Result<Option<Salary>> {
        self.mutate(CollectionKind::Salaries, |data| Ok(data.remove_salary(month)))
    }
}

fn load_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let data = fs::read_to_string(path)?;
    if data.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&data).map_err(|err| {
        BudgetError::StorageError(format!("failed to parse `{}`: {}", path.display(), err))
    })
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
