use crate::core::storage::SalaryStore;
use crate::domain::{common::validate_amount, Month, Salary};
use crate::errors::{BudgetError, Result};

const NOT_FOUND: &str = "Salary not found for this month";

pub struct SalaryService;

impl SalaryService {
    pub fn list(store: &dyn SalaryStore) -> Result<Vec<Salary>> {
        store.list()
    }

    /// The stored salary for `month`, if any. Callers report a missing month as zero.
    pub fn for_month(store: &dyn SalaryStore, month: &str) -> Result<Option<Salary>> {
        let month: Month = month.parse()?;
        store.find_by_month(month)
    }

    pub fn upsert(store: &dyn SalaryStore, month: &str, amount: f64) -> Result<Salary> {
        let month: Month = month
            .parse()
            .map_err(|_| BudgetError::Validation("Month must be in YYYY-MM format".into()))?;
        validate_amount(amount)?;
        let salary = store.upsert(month, amount)?;
        tracing::debug!(month = %salary.month, amount = salary.amount, "salary recorded");
        Ok(salary)
    }

    pub fn update(store: &dyn SalaryStore, month: &str, amount: f64) -> Result<Salary> {
        let month: Month = month.parse()?;
        validate_amount(amount)?;
        store
            .update_amount(month, amount)?
            .ok_or_else(|| BudgetError::NotFound(NOT_FOUND.into()))
    }

    pub fn delete(store: &dyn SalaryStore, month: &str) -> Result<Salary> {
        let month: Month = month.parse()?;
        store
            .delete_by_month(month)?
            .ok_or_else(|| BudgetError::NotFound(NOT_FOUND.into()))
    }
}
