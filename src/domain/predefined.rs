//! Recurring expense templates ("predefined expenses").

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    category::{Category, EntryType},
    common::{validate_amount, validate_description, validate_title, Identifiable},
    expense::NewExpense,
    month::Month,
};
use crate::errors::{BudgetError, Result};

pub const DEFAULT_DAY_OF_MONTH: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredefinedExpense {
    pub id: Uuid,
    pub title: String,
    pub amount: f64,
    pub category: Category,
    #[serde(rename = "type")]
    pub kind: EntryType,
    pub day_of_month: u32,
    pub is_active: bool,
    pub is_predefined: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PredefinedExpense {
    pub fn from_new(new: NewPredefinedExpense, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: new.title,
            amount: new.amount,
            category: new.category,
            kind: new.kind,
            day_of_month: new.day_of_month,
            is_active: new.is_active,
            is_predefined: new.is_predefined,
            description: new.description,
            created_at: now,
            updated_at: now,
        }
    }

    /// Date of this template's occurrence in `month`. The day is used as stored, so
    /// day 31 in February yields `YYYY-02-31`.
    pub fn occurrence_date(&self, month: Month) -> String {
        let day = if self.day_of_month == 0 {
            DEFAULT_DAY_OF_MONTH
        } else {
            self.day_of_month
        };
        month.date_string(day)
    }

    /// The expense this template produces for `month`.
    pub fn expense_for(&self, month: Month) -> NewExpense {
        NewExpense {
            title: self.title.clone(),
            amount: self.amount,
            category: self.category,
            date: self.occurrence_date(month),
            kind: self.kind,
        }
    }

    pub fn apply(&mut self, patch: &PredefinedExpensePatch, now: DateTime<Utc>) {
        if let Some(title) = &patch.title {
            self.title = title.trim().to_string();
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(day) = patch.day_of_month {
            self.day_of_month = day;
        }
        if let Some(active) = patch.is_active {
            self.is_active = active;
        }
        if let Some(flag) = patch.is_predefined {
            self.is_predefined = flag;
        }
        if let Some(description) = &patch.description {
            self.description = Some(description.trim().to_string());
        }
        self.updated_at = now;
    }

    pub fn validate(&self) -> Result<()> {
        validate_title(&self.title)?;
        validate_amount(self.amount)?;
        validate_day_of_month(self.day_of_month)?;
        validate_description(self.description.as_deref())?;
        Ok(())
    }
}

impl Identifiable for PredefinedExpense {
    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPredefinedExpense {
    pub title: String,
    pub amount: f64,
    pub category: Category,
    #[serde(default, rename = "type")]
    pub kind: EntryType,
    #[serde(default = "default_day_of_month")]
    pub day_of_month: u32,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub is_predefined: bool,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewPredefinedExpense {
    /// Convenience constructor with the schema defaults applied.
    pub fn new(title: impl Into<String>, amount: f64, category: Category) -> Self {
        Self {
            title: title.into(),
            amount,
            category,
            kind: EntryType::default(),
            day_of_month: DEFAULT_DAY_OF_MONTH,
            is_active: true,
            is_predefined: false,
            description: None,
        }
    }

    pub fn with_day(mut self, day_of_month: u32) -> Self {
        self.day_of_month = day_of_month;
        self
    }

    pub fn with_kind(mut self, kind: EntryType) -> Self {
        self.kind = kind;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn validated(self) -> Result<Self> {
        let title = validate_title(&self.title)?;
        validate_amount(self.amount)?;
        validate_day_of_month(self.day_of_month)?;
        let description = validate_description(self.description.as_deref())?;
        Ok(Self {
            title,
            description,
            ..self
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredefinedExpensePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<EntryType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_predefined: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn validate_day_of_month(day: u32) -> Result<()> {
    if (1..=31).contains(&day) {
        Ok(())
    } else {
        Err(BudgetError::Validation(
            "Day must be between 1 and 31".into(),
        ))
    }
}

fn default_day_of_month() -> u32 {
    DEFAULT_DAY_OF_MONTH
}

fn default_active() -> bool {
    true
}
