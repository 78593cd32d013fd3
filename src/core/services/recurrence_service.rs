//! Materializes predefined expenses into concrete monthly expenses.
//!
//! Idempotence comes from occurrence equivalence rather than a provenance link: before
//! creating a template's expense for a month, the expense store is searched for any
//! record in that month with the same title, amount, category, and type. Manually
//! entered duplicates are therefore detected too. The check and the insert are separate
//! store calls, so two concurrent callers may both insert.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::storage::{
    ExpenseFilter, ExpenseStore, PredefinedExpenseFilter, PredefinedExpenseStore,
};
use crate::core::time::Clock;
use crate::domain::{Expense, Month, PredefinedExpense};
use crate::errors::{BudgetError, Result};

pub const ALREADY_EXISTS: &str = "Expense already exists for this month";

/// Upper bound on months processed by one range application.
pub const MAX_RANGE_MONTHS: usize = 24;

/// Which templates an application considers. Inactive templates are always excluded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemplateSelection {
    #[default]
    AllActive,
    Ids(Vec<Uuid>),
}

impl TemplateSelection {
    pub fn from_ids(ids: Option<Vec<Uuid>>) -> Self {
        ids.map_or(TemplateSelection::AllActive, TemplateSelection::Ids)
    }

    fn filter(&self) -> PredefinedExpenseFilter {
        match self {
            TemplateSelection::AllActive => PredefinedExpenseFilter::active(),
            TemplateSelection::Ids(ids) => PredefinedExpenseFilter::active_ids(ids.clone()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// An equivalent expense was already present; nothing was written.
    AlreadyExists,
    /// The store rejected the lookup or the insert.
    Store,
}

/// Per-template outcome other than a successful creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateFailure {
    pub template_id: Uuid,
    pub template: String,
    pub reason: String,
    pub kind: FailureKind,
}

impl TemplateFailure {
    fn new(template: &PredefinedExpense, kind: FailureKind, reason: impl Into<String>) -> Self {
        Self {
            template_id: template.id,
            template: template.title.clone(),
            reason: reason.into(),
            kind,
        }
    }
}

/// Result of applying templates to a single month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthApplication {
    pub month: Month,
    pub created: Vec<Expense>,
    pub errors: Vec<TemplateFailure>,
}

impl MonthApplication {
    pub fn skipped(&self) -> usize {
        self.errors.len()
    }

    pub fn store_failures(&self) -> impl Iterator<Item = &TemplateFailure> {
        self.errors
            .iter()
            .filter(|failure| failure.kind == FailureKind::Store)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSummary {
    pub month: Month,
    pub created: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeFailure {
    pub month: Month,
    pub template: String,
    pub message: String,
}

/// Aggregate result of applying templates across a month range.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeApplication {
    pub total_months: usize,
    pub months_processed: Vec<MonthSummary>,
    pub total_created: usize,
    pub errors: Vec<RangeFailure>,
}

/// Applies predefined expenses against the expense store.
pub struct RecurrenceService<'a> {
    templates: &'a dyn PredefinedExpenseStore,
    expenses: &'a dyn ExpenseStore,
    clock: &'a dyn Clock,
}

impl<'a> RecurrenceService<'a> {
    pub fn new(
        templates: &'a dyn PredefinedExpenseStore,
        expenses: &'a dyn ExpenseStore,
        clock: &'a dyn Clock,
    ) -> Self {
        Self {
            templates,
            expenses,
            clock,
        }
    }

    /// Applies the selected templates to `month`.
    ///
    /// A malformed month fails before any store access. Failing to load templates
    /// aborts the call; failures for individual templates are reported in the result.
    pub fn apply_to_month(
        &self,
        month: &str,
        selection: &TemplateSelection,
    ) -> Result<MonthApplication> {
        let month: Month = month.parse()?;
        let templates = self.templates.find(&selection.filter())?;
        let application = self.materialize_month(month, &templates);
        tracing::info!(
            month = %month,
            templates = templates.len(),
            created = application.created.len(),
            skipped = application.skipped(),
            "applied predefined expenses to month"
        );
        Ok(application)
    }

    /// Applies the selected templates to every month from `start` to `end` inclusive.
    ///
    /// `start` may not precede the current month. Without `end` the range runs
    /// [`MAX_RANGE_MONTHS`] months past the current month, and any range is cut to its
    /// first [`MAX_RANGE_MONTHS`] months. At this level skips and store failures are
    /// both counted as skipped; store failures are also listed in `errors`.
    pub fn apply_to_range(
        &self,
        start: Option<&str>,
        end: Option<&str>,
        selection: &TemplateSelection,
    ) -> Result<RangeApplication> {
        let months = self.plan_range(start, end)?;
        let templates = self.templates.find(&selection.filter())?;

        let mut result = RangeApplication {
            total_months: months.len(),
            ..RangeApplication::default()
        };
        for month in months {
            let application = self.materialize_month(month, &templates);
            result.total_created += application.created.len();
            result
                .errors
                .extend(application.store_failures().map(|failure| RangeFailure {
                    month,
                    template: failure.template.clone(),
                    message: failure.reason.clone(),
                }));
            result.months_processed.push(MonthSummary {
                month,
                created: application.created.len(),
                skipped: application.skipped(),
            });
        }

        tracing::info!(
            months = result.total_months,
            templates = templates.len(),
            created = result.total_created,
            failures = result.errors.len(),
            "applied predefined expenses to month range"
        );
        Ok(result)
    }

    /// Validates the range bounds and returns the months to process.
    pub fn plan_range(&self, start: Option<&str>, end: Option<&str>) -> Result<Vec<Month>> {
        let start: Month = start
            .ok_or_else(invalid_start)?
            .parse()
            .map_err(|_| invalid_start())?;
        let current = self.clock.current_month();
        if start < current {
            return Err(BudgetError::InvalidInput(
                "Start month cannot be in the past".into(),
            ));
        }
        let end = match end {
            Some(raw) => raw.parse::<Month>().map_err(|_| {
                BudgetError::InvalidInput("endMonth must be in YYYY-MM format".into())
            })?,
            None => current.plus_months(MAX_RANGE_MONTHS as u32),
        };
        Ok(month_sequence(start, end))
    }

    /// Runs every template against one month. Never fails as a whole.
    pub fn materialize_month(
        &self,
        month: Month,
        templates: &[PredefinedExpense],
    ) -> MonthApplication {
        let mut application = MonthApplication {
            month,
            created: Vec::new(),
            errors: Vec::new(),
        };

        for template in templates {
            let candidate = template.expense_for(month);
            let filter = ExpenseFilter::occurrence_in_month(month, &candidate);
            match self.expenses.find_one(&filter) {
                Ok(Some(existing)) => {
                    tracing::debug!(
                        month = %month,
                        template = %template.title,
                        existing = %existing.id,
                        "equivalent expense already present"
                    );
                    application.errors.push(TemplateFailure::new(
                        template,
                        FailureKind::AlreadyExists,
                        ALREADY_EXISTS,
                    ));
                    continue;
                }
                Ok(None) => {}
                Err(err) => {
                    application.errors.push(store_failure(month, template, err));
                    continue;
                }
            }

            match self.expenses.create(candidate) {
                Ok(expense) => application.created.push(expense),
                Err(err) => application.errors.push(store_failure(month, template, err)),
            }
        }

        application
    }
}

/// Months from `start` to `end` inclusive, truncated to [`MAX_RANGE_MONTHS`] entries.
pub fn month_sequence(start: Month, end: Month) -> Vec<Month> {
    let mut months = Vec::new();
    let mut current = start;
    while current <= end && months.len() < MAX_RANGE_MONTHS {
        months.push(current);
        current = current.succ();
    }
    months
}

fn store_failure(month: Month, template: &PredefinedExpense, err: BudgetError) -> TemplateFailure {
    tracing::warn!(
        month = %month,
        template = %template.title,
        error = %err,
        "failed to materialize predefined expense"
    );
    TemplateFailure::new(template, FailureKind::Store, err.to_string())
}

fn invalid_start() -> BudgetError {
    BudgetError::InvalidInput("Valid startMonth (YYYY-MM) is required".into())
}
