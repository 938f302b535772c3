use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

use crate::domain::money::Money;
use crate::error::{DealflowError, Result};

/// Unique identifier for a deal (e.g., deal-1, deal-42)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DealId(String);

impl DealId {
    const GENERATED_PREFIX: &'static str = "deal-";

    /// Generates a fresh identifier for a deal created at runtime
    pub fn generate() -> Self {
        Self(format!(
            "{}{}",
            Self::GENERATED_PREFIX,
            Uuid::new_v4().simple()
        ))
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for DealId {
    type Err = DealflowError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.is_empty() || s.chars().any(char::is_whitespace) {
            return Err(DealflowError::InvalidDealId(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for DealId {
    type Error = DealflowError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DealId> for String {
    fn from(id: DealId) -> Self {
        id.0
    }
}

impl fmt::Display for DealId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A deal tracked through the sales pipeline
///
/// Deals are never edited by the board; only their position changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deal {
    pub id: DealId,
    pub title: String,
    pub client: String,
    /// Display value, e.g. `"$12,500"`
    pub value: String,
    pub due_date: NaiveDate,
    pub assigned_to: String,
}

impl Deal {
    pub fn new(
        id: DealId,
        title: impl Into<String>,
        client: impl Into<String>,
        value: impl Into<String>,
        due_date: NaiveDate,
        assigned_to: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            client: client.into(),
            value: value.into(),
            due_date,
            assigned_to: assigned_to.into(),
        }
    }

    /// Parses the display value into an amount
    pub fn amount(&self) -> Result<Money> {
        self.value.parse()
    }
}
