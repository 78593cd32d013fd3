//! Data-access contracts consumed by the services.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{
    Category, EntryType, Expense, ExpensePatch, Month, NewExpense, NewPredefinedExpense,
    PredefinedExpense, PredefinedExpensePatch, Salary,
};
use crate::errors::Result;

/// Predicate over expenses. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseFilter {
    pub date: Option<String>,
    pub date_prefix: Option<String>,
    pub title: Option<String>,
    pub amount: Option<f64>,
    pub category: Option<Category>,
    pub kind: Option<EntryType>,
}

impl ExpenseFilter {
    /// Matches expenses whose date starts with `prefix` (typically a `YYYY-MM` month).
    pub fn with_date_prefix(prefix: impl Into<String>) -> Self {
        Self {
            date_prefix: Some(prefix.into()),
            ..Self::default()
        }
    }

    /// Matches any expense in `month` equivalent to `candidate` on title, amount,
    /// category, and type.
    pub fn occurrence_in_month(month: Month, candidate: &NewExpense) -> Self {
        Self {
            date: None,
            date_prefix: Some(month.to_string()),
            title: Some(candidate.title.clone()),
            amount: Some(candidate.amount),
            category: Some(candidate.category),
            kind: Some(candidate.kind),
        }
    }

    pub fn matches(&self, expense: &Expense) -> bool {
        self.date.as_ref().map_or(true, |date| &expense.date == date)
            && self
                .date_prefix
                .as_ref()
                .map_or(true, |prefix| expense.date.starts_with(prefix.as_str()))
            && self.title.as_ref().map_or(true, |title| &expense.title == title)
            && self.amount.map_or(true, |amount| expense.amount == amount)
            && self.category.map_or(true, |category| expense.category == category)
            && self.kind.map_or(true, |kind| expense.kind == kind)
    }
}

/// Predicate over predefined expenses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredefinedExpenseFilter {
    pub ids: Option<Vec<Uuid>>,
    pub active: Option<bool>,
}

impl PredefinedExpenseFilter {
    pub fn active() -> Self {
        Self {
            ids: None,
            active: Some(true),
        }
    }

    pub fn active_ids(ids: Vec<Uuid>) -> Self {
        Self {
            ids: Some(ids),
            active: Some(true),
        }
    }

    pub fn matches(&self, template: &PredefinedExpense) -> bool {
        self.ids.as_ref().map_or(true, |ids| ids.contains(&template.id))
            && self.active.map_or(true, |active| template.is_active == active)
    }
}

/// Transaction store. `find` orders by date then creation time, newest first;
/// `find_one` returns the first match in storage order.
pub trait ExpenseStore: Send + Sync {
    fn find(&self, filter: &ExpenseFilter) -> Result<Vec<Expense>>;
    fn find_one(&self, filter: &ExpenseFilter) -> Result<Option<Expense>>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Expense>>;
    fn create(&self, new: NewExpense) -> Result<Expense>;
    /// Applies `patch`, rejecting the update if the merged record is invalid.
    fn update_by_id(&self, id: Uuid, patch: &ExpensePatch) -> Result<Option<Expense>>;
    fn delete_by_id(&self, id: Uuid) -> Result<Option<Expense>>;
}

/// Template store. `find` returns records in creation order.
pub trait PredefinedExpenseStore: Send + Sync {
    fn find(&self, filter: &PredefinedExpenseFilter) -> Result<Vec<PredefinedExpense>>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<PredefinedExpense>>;
    fn create(&self, new: NewPredefinedExpense) -> Result<PredefinedExpense>;
    fn update_by_id(
        &self,
        id: Uuid,
        patch: &PredefinedExpensePatch,
    ) -> Result<Option<PredefinedExpense>>;
    fn delete_by_id(&self, id: Uuid) -> Result<Option<PredefinedExpense>>;
}

pub trait SalaryStore: Send + Sync {
    /// All salaries, newest month first.
    fn list(&self) -> Result<Vec<Salary>>;
    fn find_by_month(&self, month: Month) -> Result<Option<Salary>>;
    /// Creates the month's salary or replaces its amount.
    fn upsert(&self, month: Month, amount: f64) -> Result<Salary>;
    fn update_amount(&self, month: Month, amount: f64) -> Result<Option<Salary>>;
    fn delete_by_month(&self, month: Month) -> Result<Option<Salary>>;
}

/// The store handles shared by request handlers.
#[derive(Clone)]
pub struct Stores {
    pub expenses: Arc<dyn ExpenseStore>,
    pub predefined: Arc<dyn PredefinedExpenseStore>,
    pub salaries: Arc<dyn SalaryStore>,
}

impl Stores {
    /// Uses one backend for all three collections.
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: ExpenseStore + PredefinedExpenseStore + SalaryStore + 'static,
    {
        Self {
            expenses: backend.clone(),
            predefined: backend.clone(),
            salaries: backend,
        }
    }
}

/// Sorts expenses by date, then creation time, newest first.
pub fn sort_newest_first(expenses: &mut [Expense]) {
    expenses.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}
