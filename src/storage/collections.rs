//! In-memory document collections shared by the storage backends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::storage::{sort_newest_first, ExpenseFilter, PredefinedExpenseFilter};
use crate::domain::{
    Expense, ExpensePatch, Identifiable, Month, NewExpense, NewPredefinedExpense,
    PredefinedExpense, PredefinedExpensePatch, Salary,
};
use crate::errors::Result;

/// Identifies one persisted collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    Expenses,
    PredefinedExpenses,
    Salaries,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 3] = [
        CollectionKind::Expenses,
        CollectionKind::PredefinedExpenses,
        CollectionKind::Salaries,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            CollectionKind::Expenses => "expenses.json",
            CollectionKind::PredefinedExpenses => "predefined_expenses.json",
            CollectionKind::Salaries => "salaries.json",
        }
    }
}

/// Records kept in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Collections {
    pub expenses: Vec<Expense>,
    pub predefined: Vec<PredefinedExpense>,
    pub salaries: Vec<Salary>,
}

impl Collections {
    pub fn find_expenses(&self, filter: &ExpenseFilter) -> Vec<Expense> {
        let mut found: Vec<_> = self
            .expenses
            .iter()
            .filter(|expense| filter.matches(expense))
            .cloned()
            .collect();
        sort_newest_first(&mut found);
        found
    }

    pub fn find_one_expense(&self, filter: &ExpenseFilter) -> Option<Expense> {
        self.expenses
            .iter()
            .find(|expense| filter.matches(expense))
            .cloned()
    }

    pub fn expense(&self, id: Uuid) -> Option<Expense> {
        by_id(&self.expenses, id).cloned()
    }

    pub fn insert_expense(&mut self, new: NewExpense, now: DateTime<Utc>) -> Expense {
        let expense = Expense::from_new(new, now);
        self.expenses.push(expense.clone());
        expense
    }

    pub fn update_expense(
        &mut self,
        id: Uuid,
        patch: &ExpensePatch,
        now: DateTime<Utc>,
    ) -> Result<Option<Expense>> {
        let Some(slot) = by_id_mut(&mut self.expenses, id) else {
            return Ok(None);
        };
        let mut updated = slot.clone();
        updated.apply(patch, now);
        updated.validate()?;
        *slot = updated.clone();
        Ok(Some(updated))
    }

    pub fn remove_expense(&mut self, id: Uuid) -> Option<Expense> {
        let index = self.expenses.iter().position(|e| e.id() == id)?;
        Some(self.expenses.remove(index))
    }

    pub fn find_predefined(&self, filter: &PredefinedExpenseFilter) -> Vec<PredefinedExpense> {
        self.predefined
            .iter()
            .filter(|template| filter.matches(template))
            .cloned()
            .collect()
    }

    pub fn predefined(&self, id: Uuid) -> Option<PredefinedExpense> {
        by_id(&self.predefined, id).cloned()
    }

    pub fn insert_predefined(
        &mut self,
        new: NewPredefinedExpense,
        now: DateTime<Utc>,
    ) -> PredefinedExpense {
        let template = PredefinedExpense::from_new(new, now);
        self.predefined.push(template.clone());
        template
    }

    pub fn update_predefined(
        &mut self,
        id: Uuid,
        patch: &PredefinedExpensePatch,
        now: DateTime<Utc>,
    ) -> Result<Option<PredefinedExpense>> {
        let Some(slot) = by_id_mut(&mut self.predefined, id) else {
            return Ok(None);
        };
        let mut updated = slot.clone();
        updated.apply(patch, now);
        updated.validate()?;
        *slot = updated.clone();
        Ok(Some(updated))
    }

    pub fn remove_predefined(&mut self, id: Uuid) -> Option<PredefinedExpense> {
        let index = self.predefined.iter().position(|t| t.id() == id)?;
        Some(self.predefined.remove(index))
    }

    pub fn salaries_newest_first(&self) -> Vec<Salary> {
        let mut salaries = self.salaries.clone();
        salaries.sort_by(|a, b| b.month.cmp(&a.month));
        salaries
    }

    pub fn salary(&self, month: Month) -> Option<Salary> {
        self.salaries.iter().find(|s| s.month == month).cloned()
    }

    pub fn upsert_salary(&mut self, month: Month, amount: f64, now: DateTime<Utc>) -> Salary {
        if let Some(existing) = self.salaries.iter_mut().find(|s| s.month == month) {
            existing.amount = amount;
            existing.updated_at = now;
            return existing.clone();
        }
        let salary = Salary::new(month, amount, now);
        self.salaries.push(salary.clone());
        salary
    }

    pub fn update_salary(
        &mut self,
        month: Month,
        amount: f64,
        now: DateTime<Utc>,
    ) -> Option<Salary> {
        let existing = self.salaries.iter_mut().find(|s| s.month == month)?;
        existing.amount = amount;
        existing.updated_at = now;
        Some(existing.clone())
    }

    pub fn remove_salary(&mut self, month: Month) -> Option<Salary> {
        let index = self.salaries.iter().position(|s| s.month == month)?;
        Some(self.salaries.remove(index))
    }
}

fn by_id<T: Identifiable>(items: &[T], id: Uuid) -> Option<&T> {
    items.iter().find(|item| item.id() == id)
}

fn by_id_mut<T: Identifiable>(items: &mut [T], id: Uuid) -> Option<&mut T> {
    items.iter_mut().find(|item| item.id() == id)
}
