//! Business logic helpers for managing expenses.

use uuid::Uuid;

use crate::core::storage::{ExpenseFilter, ExpenseStore};
use crate::domain::{Expense, ExpensePatch, NewExpense};
use crate::errors::{BudgetError, Result};

const NOT_FOUND: &str = "Expense not found";

/// Provides validated CRUD helpers for expenses.
pub struct ExpenseService;

impl ExpenseService {
    /// Lists expenses, newest first, optionally restricted to dates starting with `month`.
    pub fn list(store: &dyn ExpenseStore, month: Option<&str>) -> Result<Vec<Expense>> {
        let filter = match month {
            Some(prefix) if !prefix.is_empty() => ExpenseFilter::with_date_prefix(prefix),
            _ => ExpenseFilter::default(),
        };
        store.find(&filter)
    }

    pub fn get(store: &dyn ExpenseStore, id: Uuid) -> Result<Expense> {
        store
            .find_by_id(id)?
            .ok_or_else(|| BudgetError::NotFound(NOT_FOUND.into()))
    }

    pub fn create(store: &dyn ExpenseStore, new: NewExpense) -> Result<Expense> {
        let new = new.validated()?;
        let expense = store.create(new)?;
        tracing::debug!(id = %expense.id, date = %expense.date, "expense created");
        Ok(expense)
    }

    pub fn update(store: &dyn ExpenseStore, id: Uuid, patch: &ExpensePatch) -> Result<Expense> {
        store
            .update_by_id(id, patch)?
            .ok_or_else(|| BudgetError::NotFound(NOT_FOUND.into()))
    }

    pub fn delete(store: &dyn ExpenseStore, id: Uuid) -> Result<Expense> {
        store
            .delete_by_id(id)?
            .ok_or_else(|| BudgetError::NotFound(NOT_FOUND.into()))
    }
}
