use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    category::{Category, EntryType},
    common::{validate_amount, validate_date, validate_title, Identifiable},
};
use crate::errors::Result;

/// A single dated expense or income record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: Uuid,
    pub title: String,
    pub amount: f64,
    pub category: Category,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: EntryType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    /// Materializes a validated payload into a stored record.
    pub fn from_new(new: NewExpense, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: new.title,
            amount: new.amount,
            category: new.category,
            date: new.date,
            kind: new.kind,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: &ExpensePatch, now: DateTime<Utc>) {
        if let Some(title) = &patch.title {
            self.title = title.trim().to_string();
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(date) = &patch.date {
            self.date = date.clone();
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        self.updated_at = now;
    }

    pub fn validate(&self) -> Result<()> {
        validate_title(&self.title)?;
        validate_amount(self.amount)?;
        validate_date(&self.date)
    }
}

impl Identifiable for Expense {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Creation payload for an expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub title: String,
    pub amount: f64,
    pub category: Category,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: EntryType,
}

impl NewExpense {
    /// Checks field constraints and returns the normalized payload.
    pub fn validated(self) -> Result<Self> {
        let title = validate_title(&self.title)?;
        validate_amount(self.amount)?;
        validate_date(&self.date)?;
        Ok(Self { title, ..self })
    }
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpensePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<EntryType>,
}
