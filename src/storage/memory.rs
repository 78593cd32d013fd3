use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

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

use super::collections::Collections;

/// Non-persistent store. Contents are lost when the process exits.
#[derive(Debug)]
pub struct MemoryStore {
    data: RwLock<Collections>,
    clock: Arc<dyn Clock>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamps `createdAt`/`updatedAt` from `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            data: RwLock::new(Collections::default()),
            clock,
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Collections>> {
        self.data
            .read()
            .map_err(|_| BudgetError::StorageError("memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Collections>> {
        self.data
            .write()
            .map_err(|_| BudgetError::StorageError("memory store lock poisoned".into()))
    }
}

impl ExpenseStore for MemoryStore {
    fn find(&self, filter: &ExpenseFilter) -> Result<Vec<Expense>> {
        Ok(self.read()?.find_expenses(filter))
    }

    fn find_one(&self, filter: &ExpenseFilter) -> Result<Option<Expense>> {
        Ok(self.read()?.find_one_expense(filter))
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Expense>> {
        Ok(self.read()?.expense(id))
    }

    fn create(&self, new: NewExpense) -> Result<Expense> {
        Ok(self.write()?.insert_expense(new, self.clock.now()))
    }

    fn update_by_id(&self, id: Uuid, patch: &ExpensePatch) -> Result<Option<Expense>> {
        self.write()?.update_expense(id, patch, self.clock.now())
    }

    fn delete_by_id(&self, id: Uuid) -> Result<Option<Expense>> {
        Ok(self.write()?.remove_expense(id))
    }
}

impl PredefinedExpenseStore for MemoryStore {
    fn find(&self, filter: &PredefinedExpenseFilter) -> Result<Vec<PredefinedExpense>> {
        Ok(self.read()?.find_predefined(filter))
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<PredefinedExpense>> {
        Ok(self.read()?.predefined(id))
    }

    fn create(&self, new: NewPredefinedExpense) -> Result<PredefinedExpense> {
        Ok(self.write()?.insert_predefined(new, self.clock.now()))
    }

    fn update_by_id(
        &self,
        id: Uuid,
        patch: &PredefinedExpensePatch,
    ) -> Result<Option<PredefinedExpense>> {
        self.write()?.update_predefined(id, patch, self.clock.now())
    }

    fn delete_by_id(&self, id: Uuid) -> Result<Option<PredefinedExpense>> {
        Ok(self.write()?.remove_predefined(id))
    }
}

impl SalaryStore for MemoryStore {
    fn list(&self) -> Result<Vec<Salary>> {
        Ok(self.read()?.salaries_newest_first())
    }

    fn find_by_month(&self, month: Month) -> Result<Option<Salary>> {
        Ok(self.read()?.salary(month))
    }

    fn upsert(&self, month: Month, amount: f64) -> Result<Salary> {
        Ok(self.write()?.upsert_salary(month, amount, self.clock.now()))
    }

    fn update_amount(&self, month: Month, amount: f64) -> Result<Option<Salary>> {
        Ok(self.write()?.update_salary(month, amount, self.clock.now()))
    }

    fn delete_by_month(&self, month: Month) -> Result<Option<Salary>> {
        Ok(self.write()?.remove_salary(month))
    }
}
