//! Shared traits and field validation for budget records.

use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

use crate::errors::{BudgetError, Result};

pub const TITLE_MAX_LEN: usize = 100;
pub const DESCRIPTION_MAX_LEN: usize = 500;

static DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date pattern"));

/// Exposes a stable identifier for stored records.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Trims and checks a title, returning the normalized value.
pub fn validate_title(title: &str) -> Result<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(BudgetError::Validation("Please provide a title".into()));
    }
    if trimmed.chars().count() > TITLE_MAX_LEN {
        return Err(BudgetError::Validation(format!(
            "Title cannot be more than {} characters",
            TITLE_MAX_LEN
        )));
    }
    Ok(trimmed.to_string())
}

pub fn validate_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() {
        return Err(BudgetError::Validation("Please provide an amount".into()));
    }
    if amount < 0.0 {
        return Err(BudgetError::Validation("Amount cannot be negative".into()));
    }
    Ok(())
}

/// Checks the `YYYY-MM-DD` shape only; `2025-02-31` is accepted.
pub fn validate_date(date: &str) -> Result<()> {
    if DATE_PATTERN.is_match(date) {
        Ok(())
    } else {
        Err(BudgetError::Validation(
            "Date must be in YYYY-MM-DD format".into(),
        ))
    }
}

pub fn validate_description(description: Option<&str>) -> Result<Option<String>> {
    let Some(raw) = description else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.chars().count() > DESCRIPTION_MAX_LEN {
        return Err(BudgetError::Validation(format!(
            "Description cannot be more than {} characters",
            DESCRIPTION_MAX_LEN
        )));
    }
    Ok(Some(trimmed.to_string()))
}
