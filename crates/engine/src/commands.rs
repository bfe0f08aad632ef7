//! Command structs for engine operations.
//!
//! These types group parameters for write operations
//! (registration, income, expense, goal, advice), keeping call sites readable
//! and avoiding long argument lists.

use chrono::{DateTime, NaiveDate, Utc};

use crate::EntryType;

/// Register a new user.
#[derive(Clone, Debug)]
pub struct RegisterCmd {
    pub username: String,
    pub password: String,
    pub email: String,
    pub name: String,
}

/// Record an income.
#[derive(Clone, Debug)]
pub struct IncomeCmd {
    pub user_id: String,
    pub amount: f64,
    pub source: Option<String>,
    pub entry_type: Option<EntryType>,
    pub category: Option<String>,
    /// Declared date of the income. Defaults to now.
    pub date: Option<DateTime<Utc>>,
}

impl IncomeCmd {
    #[must_use]
    pub fn new(user_id: impl Into<String>, amount: f64) -> Self {
        Self {
            user_id: user_id.into(),
            amount,
            source: None,
            entry_type: None,
            category: None,
            date: None,
        }
    }

    #[must_use]
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn entry_type(mut self, entry_type: EntryType) -> Self {
        self.entry_type = Some(entry_type);
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }
}

/// Record an expense.
#[derive(Clone, Debug)]
pub struct ExpenseCmd {
    pub user_id: String,
    pub amount: f64,
    pub description: Option<String>,
    pub entry_type: Option<EntryType>,
    pub category: Option<String>,
    /// Declared date of the expense. Defaults to now.
    pub date: Option<DateTime<Utc>>,
}

impl ExpenseCmd {
    #[must_use]
    pub fn new(user_id: impl Into<String>, amount: f64) -> Self {
        Self {
            user_id: user_id.into(),
            amount,
            description: None,
            entry_type: None,
            category: None,
            date: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn entry_type(mut self, entry_type: EntryType) -> Self {
        self.entry_type = Some(entry_type);
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }
}

/// Create a savings goal.
#[derive(Clone, Debug)]
pub struct GoalCmd {
    pub user_id: String,
    pub title: String,
    pub target_amount: f64,
    pub category: Option<String>,
    pub deadline: Option<NaiveDate>,
}

impl GoalCmd {
    #[must_use]
    pub fn new(user_id: impl Into<String>, title: impl Into<String>, target_amount: f64) -> Self {
        Self {
            user_id: user_id.into(),
            title: title.into(),
            target_amount,
            category: None,
            deadline: None,
        }
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Ask whether a prospective expense is affordable.
#[derive(Clone, Debug)]
pub struct AdviceCmd {
    pub user_id: String,
    pub expense_amount: f64,
    pub category: Option<String>,
    pub description: Option<String>,
}

impl AdviceCmd {
    #[must_use]
    pub fn new(user_id: impl Into<String>, expense_amount: f64) -> Self {
        Self {
            user_id: user_id.into(),
            expense_amount,
            category: None,
            description: None,
        }
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
