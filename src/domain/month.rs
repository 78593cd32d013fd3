//! Calendar month values in `YYYY-MM` form.

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::BudgetError;

const INVALID_MONTH: &str = "Invalid month format. Use YYYY-MM";

static MONTH_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}$").expect("valid month pattern"));

/// A calendar month. Ordering follows the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    pub fn new(year: i32, month: u32) -> Result<Self, BudgetError> {
        if !(1..=12).contains(&month) {
            return Err(BudgetError::InvalidInput(INVALID_MONTH.into()));
        }
        Ok(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn succ(self) -> Self {
        self.plus_months(1)
    }

    pub fn plus_months(self, months: u32) -> Self {
        let zero_based = self.month as i64 - 1 + months as i64;
        Self {
            year: self.year + (zero_based / 12) as i32,
            month: (zero_based % 12) as u32 + 1,
        }
    }

    /// Builds a `YYYY-MM-DD` string with `day` used literally, without calendar clamping.
    pub fn date_string(self, day: u32) -> String {
        format!("{}-{:02}", self, day)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = BudgetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if !MONTH_PATTERN.is_match(value) {
            return Err(BudgetError::InvalidInput(INVALID_MONTH.into()));
        }
        let (year, month) = value.split_at(4);
        let year = year
            .parse::<i32>()
            .map_err(|err| BudgetError::InvalidInput(err.to_string()))?;
        let month = month[1..]
            .parse::<u32>()
            .map_err(|err| BudgetError::InvalidInput(err.to_string()))?;
        Month::new(year, month)
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
