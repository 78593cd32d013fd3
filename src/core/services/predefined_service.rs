use uuid::Uuid;

use crate::core::storage::{PredefinedExpenseFilter, PredefinedExpenseStore};
use crate::domain::{NewPredefinedExpense, PredefinedExpense, PredefinedExpensePatch};
use crate::errors::{BudgetError, Result};

const NOT_FOUND: &str = "Predefined expense not found";

pub struct PredefinedExpenseService;

impl PredefinedExpenseService {
    /// Lists every template, most recently created first.
    pub fn list(store: &dyn PredefinedExpenseStore) -> Result<Vec<PredefinedExpense>> {
        let mut templates = store.find(&PredefinedExpenseFilter::default())?;
        templates.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(templates)
    }

    pub fn get(store: &dyn PredefinedExpenseStore, id: Uuid) -> Result<PredefinedExpense> {
        store
            .find_by_id(id)?
            .ok_or_else(|| BudgetError::NotFound(NOT_FOUND.into()))
    }

    pub fn create(
        store: &dyn PredefinedExpenseStore,
        new: NewPredefinedExpense,
    ) -> Result<PredefinedExpense> {
        let template = store.create(new.validated()?)?;
        tracing::debug!(id = %template.id, title = %template.title, "predefined expense created");
        Ok(template)
    }

    pub fn update(
        store: &dyn PredefinedExpenseStore,
        id: Uuid,
        patch: &PredefinedExpensePatch,
    ) -> Result<PredefinedExpense> {
        store
            .update_by_id(id, patch)?
            .ok_or_else(|| BudgetError::NotFound(NOT_FOUND.into()))
    }

    pub fn delete(store: &dyn PredefinedExpenseStore, id: Uuid) -> Result<PredefinedExpense> {
        store
            .delete_by_id(id)?
            .ok_or_else(|| BudgetError::NotFound(NOT_FOUND.into()))
    }
}
