//! JSON shapes exchanged with the web client.
//!
//! Field names are camelCase on the wire.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Lenient amount parsing.
///
/// The web form submits amounts as strings. Numbers and numeric strings are
/// accepted; anything else, including a missing field, becomes `NaN` and is
/// rejected by validation downstream.
pub mod amount {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    pub fn missing() -> f64 {
        f64::NAN
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Raw>::deserialize(deserializer)? {
            Some(Raw::Number(value)) => value,
            Some(Raw::Text(text)) => text.trim().parse().unwrap_or(f64::NAN),
            None => f64::NAN,
        })
    }
}

/// Optional calendar date where an empty string means "no date".
pub mod optional_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, de::Error};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(text) if text.trim().is_empty() => Ok(None),
            Some(text) => NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
                .map(Some)
                .map_err(D::Error::custom),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryType {
    #[default]
    OneTime,
    Recurring,
}

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human readable message.
    pub error: String,
    /// Stable machine readable kind.
    pub kind: String,
}

pub mod health {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DatabaseStatus {
        #[serde(rename = "type")]
        pub kind: String,
        pub connected: bool,
        pub message: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Health {
        pub status: String,
        pub message: String,
        pub database: DatabaseStatus,
    }
}

pub mod user {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Login {
        pub username: String,
        pub password: String,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Register {
        pub username: String,
        pub password: String,
        pub email: String,
        pub name: String,
    }

    /// A user as shown to clients. Never carries the password.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserSummary {
        pub id: String,
        pub username: String,
        pub email: String,
        pub name: String,
    }
}

pub mod income {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct IncomeNew {
        #[serde(default = "amount::missing", deserialize_with = "amount::deserialize")]
        pub amount: f64,
        pub source: Option<String>,
        #[serde(rename = "type")]
        pub entry_type: Option<EntryType>,
        pub category: Option<String>,
        /// RFC3339 timestamp. Defaults to now.
        pub date: Option<DateTime<FixedOffset>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct IncomeView {
        pub id: String,
        pub user_id: String,
        pub amount: f64,
        pub source: Option<String>,
        #[serde(rename = "type")]
        pub entry_type: EntryType,
        pub category: String,
        pub date: DateTime<Utc>,
        pub created_at: DateTime<Utc>,
    }
}

pub mod expense {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseNew {
        #[serde(default = "amount::missing", deserialize_with = "amount::deserialize")]
        pub amount: f64,
        pub description: Option<String>,
        #[serde(rename = "type")]
        pub entry_type: Option<EntryType>,
        pub category: Option<String>,
        /// RFC3339 timestamp. Defaults to now.
        pub date: Option<DateTime<FixedOffset>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseView {
        pub id: String,
        pub user_id: String,
        pub amount: f64,
        pub description: Option<String>,
        #[serde(rename = "type")]
        pub entry_type: EntryType,
        pub category: String,
        pub date: DateTime<Utc>,
        pub created_at: DateTime<Utc>,
    }
}

pub mod goal {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GoalNew {
        #[serde(default)]
        pub title: String,
        #[serde(default = "amount::missing", deserialize_with = "amount::deserialize")]
        pub target_amount: f64,
        pub category: Option<String>,
        #[serde(default, deserialize_with = "optional_date::deserialize")]
        pub deadline: Option<NaiveDate>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoalFund {
        #[serde(default = "amount::missing", deserialize_with = "amount::deserialize")]
        pub amount: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GoalView {
        pub id: String,
        pub user_id: String,
        pub title: String,
        pub target_amount: f64,
        pub current_amount: f64,
        pub category: String,
        pub deadline: Option<NaiveDate>,
        pub created_at: DateTime<Utc>,
        /// What is still missing to reach the target, never negative.
        pub remaining_amount: f64,
        /// `currentAmount >= targetAmount`.
        pub completed: bool,
    }
}

pub mod dashboard {
    use std::collections::BTreeMap;

    use super::*;
    use crate::goal::GoalView;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TransactionKind {
        Income,
        Expense,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RecentTransaction {
        pub id: String,
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        pub amount: f64,
        /// Income source or expense description.
        pub description: Option<String>,
        pub category: String,
        pub entry_type: EntryType,
        pub date: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Analytics {
        pub income_by_category: BTreeMap<String, f64>,
        pub expense_by_category: BTreeMap<String, f64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Dashboard {
        pub total_income: f64,
        pub total_expenses: f64,
        pub savings: f64,
        /// Percentage with two decimals, e.g. `"80.00"`.
        pub savings_rate: String,
        pub recent_transactions: Vec<RecentTransaction>,
        pub goals: Vec<GoalView>,
        pub analytics: Analytics,
    }
}

pub mod advice {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Severity {
        Success,
        Warning,
        Danger,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AdviceRequest {
        #[serde(default = "amount::missing", deserialize_with = "amount::deserialize")]
        pub expense_amount: f64,
        #[serde(alias = "category")]
        pub expense_category: Option<String>,
        pub description: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct FinancialHealth {
        pub current_balance: f64,
        /// Percentage with two decimals, e.g. `"70.00"`.
        pub expense_ratio: String,
        pub can_afford: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AdviceResponse {
        pub advice: String,
        pub emotion: String,
        pub severity: Severity,
        pub financial_health: FinancialHealth,
    }
}
