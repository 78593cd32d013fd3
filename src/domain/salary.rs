use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{common::Identifiable, month::Month};

/// Income recorded for one calendar month; at most one per month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Salary {
    pub id: Uuid,
    pub month: Month,
    pub amount: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Salary {
    pub fn new(month: Month, amount: f64, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            month,
            amount,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Identifiable for Salary {
    fn id(&self) -> Uuid {
        self.id
    }
}
