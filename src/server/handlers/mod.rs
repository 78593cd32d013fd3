pub mod expenses;
pub mod predefined;
pub mod salaries;
pub mod system;

use uuid::Uuid;

use crate::errors::BudgetError;

/// Parses a record id from a path segment.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, BudgetError> {
    Uuid::parse_str(raw).map_err(|_| BudgetError::InvalidInput(format!("Invalid id `{}`", raw)))
}
