//! Ledger aggregation.
//!
//! Pure functions turning a user's income, expenses and goals into totals,
//! balances and the dashboard view. Amounts are `f64`; there is no
//! fixed-point guarantee.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::{EntryType, Expense, Goal, Income, entry::category_or_default};

/// How many records of each kind feed the recent activity window.
pub const RECENT_WINDOW_PER_KIND: usize = 5;
/// How many entries the recent activity view returns at most.
pub const RECENT_ACTIVITY_LEN: usize = 10;

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Totals {
    pub income: f64,
    pub expenses: f64,
}

impl Totals {
    pub fn new(income: &[Income], expenses: &[Expense]) -> Self {
        Self {
            income: income.iter().map(|i| i.amount).sum(),
            expenses: expenses.iter().map(|e| e.amount).sum(),
        }
    }

    /// Income minus expenses. May be negative.
    pub fn savings(&self) -> f64 {
        self.income - self.expenses
    }

    /// Percentage of income saved, rounded to two decimals. `0` without income.
    pub fn savings_rate(&self) -> f64 {
        if self.income == 0.0 {
            return 0.0;
        }
        round2(self.savings() / self.income * 100.0)
    }
}

/// Money already committed to goals other than `excluding`.
pub fn committed_to_other_goals(goals: &[Goal], excluding: &Goal) -> f64 {
    goals
        .iter()
        .filter(|g| g.id != excluding.id)
        .map(|g| g.current_amount)
        .sum()
}

/// Income minus expenses minus what is committed to the other goals.
///
/// The goal being funded is left out so topping it up is not blocked by its
/// own previous contributions.
pub fn available_balance(totals: &Totals, goals: &[Goal], excluding: &Goal) -> f64 {
    totals.savings() - committed_to_other_goals(goals, excluding)
}

/// Sum amounts per category; blank categories are counted as `other`.
pub fn category_breakdown<'a, I>(entries: I) -> BTreeMap<String, f64>
where
    I: IntoIterator<Item = (Option<&'a str>, f64)>,
{
    entries
        .into_iter()
        .fold(BTreeMap::new(), |mut acc, (category, amount)| {
            *acc.entry(category_or_default(category)).or_insert(0.0) += amount;
            acc
        })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivityKind {
    Income,
    Expense,
}

impl ActivityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

/// One line of the recent activity view.
#[derive(Clone, Debug, PartialEq)]
pub struct Activity {
    pub kind: ActivityKind,
    pub id: String,
    pub amount: f64,
    /// Income source or expense description.
    pub label: Option<String>,
    pub category: String,
    pub entry_type: EntryType,
    pub date: DateTime<Utc>,
}

impl From<&Income> for Activity {
    fn from(value: &Income) -> Self {
        Self {
            kind: ActivityKind::Income,
            id: value.id.clone(),
            amount: value.amount,
            label: value.source.clone(),
            category: value.category.clone(),
            entry_type: value.entry_type,
            date: value.date,
        }
    }
}

impl From<&Expense> for Activity {
    fn from(value: &Expense) -> Self {
        Self {
            kind: ActivityKind::Expense,
            id: value.id.clone(),
            amount: value.amount,
            label: value.description.clone(),
            category: value.category.clone(),
            entry_type: value.entry_type,
            date: value.date,
        }
    }
}

fn last<T>(records: &[T], n: usize) -> &[T] {
    &records[records.len().saturating_sub(n)..]
}

/// Recent activity: the last five stored income and the last five stored
/// expenses, merged and sorted by their declared `date`, newest first.
///
/// Only the last-inserted window is considered, so an older insert carrying a
/// later `date` can be left out.
pub fn recent_activity(income: &[Income], expenses: &[Expense]) -> Vec<Activity> {
    let mut merged: Vec<Activity> = last(income, RECENT_WINDOW_PER_KIND)
        .iter()
        .map(Activity::from)
        .chain(
            last(expenses, RECENT_WINDOW_PER_KIND)
                .iter()
                .map(Activity::from),
        )
        .collect();
    merged.sort_by(|a, b| b.date.cmp(&a.date));
    merged.truncate(RECENT_ACTIVITY_LEN);
    merged
}

/// Aggregated view of a user's finances.
#[derive(Clone, Debug, PartialEq)]
pub struct Dashboard {
    pub totals: Totals,
    pub savings: f64,
    pub savings_rate: f64,
    pub recent_transactions: Vec<Activity>,
    pub goals: Vec<Goal>,
    pub income_by_category: BTreeMap<String, f64>,
    pub expense_by_category: BTreeMap<String, f64>,
}

impl Dashboard {
    pub fn build(income: &[Income], expenses: &[Expense], goals: Vec<Goal>) -> Self {
        let totals = Totals::new(income, expenses);
        Self {
            totals,
            savings: totals.savings(),
            savings_rate: totals.savings_rate(),
            recent_transactions: recent_activity(income, expenses),
            goals,
            income_by_category: category_breakdown(
                income.iter().map(|i| (Some(i.category.as_str()), i.amount)),
            ),
            expense_by_category: category_breakdown(
                expenses.iter().map(|e| (Some(e.category.as_str()), e.amount)),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::{NewExpense, NewGoal, NewIncome};

    fn at(day: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(0, 0).unwrap() + Duration::days(day)
    }

    fn income(n: usize, amount: f64, day: i64) -> Income {
        NewIncome {
            id: format!("income_{n}"),
            user_id: "user_1".to_string(),
            amount,
            source: Some("Salary".to_string()),
            entry_type: EntryType::Recurring,
            category: "employment".to_string(),
            date: at(day),
        }
        .into_record(at(0))
    }

    fn expense(n: usize, amount: f64, category: &str, day: i64) -> Expense {
        NewExpense {
            id: format!("expense_{n}"),
            user_id: "user_1".to_string(),
            amount,
            description: Some("Groceries".to_string()),
            entry_type: EntryType::OneTime,
            category: category.to_string(),
            date: at(day),
        }
        .into_record(at(0))
    }

    fn goal(id: &str, current: f64) -> Goal {
        let mut goal = NewGoal {
            id: id.to_string(),
            user_id: "user_1".to_string(),
            title: id.to_string(),
            target_amount: 5000.0,
            category: "savings".to_string(),
            deadline: None,
        }
        .into_record(at(0));
        goal.current_amount = current;
        goal
    }

    #[test]
    fn savings_rate_is_zero_without_income() {
        let totals = Totals::new(&[], &[expense(1, 300.0, "food", 1)]);
        assert_eq!(totals.savings(), -300.0);
        assert_eq!(totals.savings_rate(), 0.0);
        assert!(!totals.savings_rate().is_nan());
    }

    #[test]
    fn savings_rate_is_rounded_to_cents() {
        let totals = Totals {
            income: 3000.0,
            expenses: 1000.0,
        };
        assert_eq!(totals.savings_rate(), 66.67);
    }

    #[test]
    fn available_balance_excludes_the_funded_goal() {
        let totals = Totals {
            income: 10_000.0,
            expenses: 2_000.0,
        };
        let target = goal("goal_1", 1_500.0);
        let goals = vec![target.clone(), goal("goal_2", 500.0), goal("goal_3", 1_000.0)];

        assert_eq!(committed_to_other_goals(&goals, &target), 1_500.0);
        assert_eq!(available_balance(&totals, &goals, &target), 6_500.0);
    }

    #[test]
    fn breakdown_groups_blank_categories_as_other() {
        let breakdown = category_breakdown([
            (Some("food"), 10.0),
            (None, 5.0),
            (Some(""), 2.5),
            (Some("food"), 1.0),
        ]);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown["food"], 11.0);
        assert_eq!(breakdown["other"], 7.5);
    }

    #[test]
    fn recent_activity_only_sees_the_last_five_of_each_kind() {
        // income_0 carries the latest date but falls outside the window.
        let mut income_records = vec![income(0, 1.0, 100)];
        income_records.extend((1..=5).map(|n| income(n, 1.0, n as i64)));
        let expense_records: Vec<Expense> =
            (1..=7).map(|n| expense(n, 1.0, "food", n as i64 + 10)).collect();

        let recent = recent_activity(&income_records, &expense_records);
        assert_eq!(recent.len(), 10);
        assert!(recent.iter().all(|a| a.id != "income_0"));
        assert!(recent.iter().all(|a| a.id != "expense_1" && a.id != "expense_2"));
        assert_eq!(recent[0].id, "expense_7");
        assert_eq!(recent[0].kind, ActivityKind::Expense);
        assert!(recent.windows(2).all(|w| w[0].date >= w[1].date));
    }

    #[test]
    fn dashboard_reports_savings() {
        let dashboard = Dashboard::build(
            &[income(1, 5000.0, 1)],
            &[expense(1, 1000.0, "rent", 2)],
            vec![goal("goal_1", 0.0)],
        );
        assert_eq!(dashboard.totals.income, 5000.0);
        assert_eq!(dashboard.totals.expenses, 1000.0);
        assert_eq!(dashboard.savings, 4000.0);
        assert_eq!(dashboard.savings_rate, 80.0);
        assert_eq!(dashboard.goals.len(), 1);
        assert_eq!(dashboard.expense_by_category["rent"], 1000.0);
        assert_eq!(dashboard.recent_transactions.len(), 2);
    }
}
