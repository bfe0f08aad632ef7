//! Spending advice.
//!
//! Classifying a prospective expense is pure and deterministic; only the
//! choice of the message within a tier is random, behind [`MessagePicker`].

use std::{
    fmt,
    sync::{Mutex, PoisonError},
};

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Balance share above which an expense is considered reckless.
const DANGER_BALANCE_SHARE: f64 = 0.5;
/// Balance share above which an expense deserves a warning.
const WARNING_BALANCE_SHARE: f64 = 0.2;
/// Expense-to-income ratio above which the budget is considered tight.
const WARNING_EXPENSE_RATIO: f64 = 0.7;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Success,
    Warning,
    Danger,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }

    /// Mood shown next to the advice.
    pub fn emotion(self) -> &'static str {
        match self {
            Self::Success => "happy",
            Self::Warning => "worried",
            Self::Danger => "shocked",
        }
    }

    /// The fixed message pool of the tier.
    pub fn messages(self) -> &'static [&'static str; 3] {
        match self {
            Self::Success => &SUCCESS_MESSAGES,
            Self::Warning => &WARNING_MESSAGES,
            Self::Danger => &DANGER_MESSAGES,
        }
    }
}

const SUCCESS_MESSAGES: [&str; 3] = [
    "Your budget is in great shape. Go ahead and enjoy this one!",
    "You saved well for this. Buy it without guilt!",
    "Financially steady as a rock. This small treat fits right in!",
];

const WARNING_MESSAGES: [&str; 3] = [
    "Hold on a moment: half the month is gone, spend carefully!",
    "You can afford it, but the end of the month will be noodles again.",
    "The budget is tight. Think it over before you buy.",
];

const DANGER_MESSAGES: [&str; 3] = [
    "Stop! This expense would sink your account!",
    "There is barely any money left for something like this!",
    "Absolutely not. What happens to your savings then?",
];

/// Ratio of total spending, including the prospective expense, to income.
///
/// Without income the budget is considered fully committed (`1`).
pub fn expense_ratio(total_income: f64, total_expenses: f64, expense_amount: f64) -> f64 {
    if total_income > 0.0 {
        (total_expenses + expense_amount) / total_income
    } else {
        1.0
    }
}

/// Bucket a prospective expense. The first matching tier wins.
pub fn classify(current_balance: f64, expense_amount: f64, expense_ratio: f64) -> Severity {
    if current_balance <= 0.0 || expense_amount > current_balance * DANGER_BALANCE_SHARE {
        Severity::Danger
    } else if expense_ratio > WARNING_EXPENSE_RATIO
        || expense_amount > current_balance * WARNING_BALANCE_SHARE
    {
        Severity::Warning
    } else {
        Severity::Success
    }
}

/// Outcome of classifying an expense against the user's totals.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Assessment {
    pub severity: Severity,
    pub current_balance: f64,
    pub expense_ratio: f64,
}

impl Assessment {
    pub fn new(total_income: f64, total_expenses: f64, expense_amount: f64) -> Self {
        let current_balance = total_income - total_expenses;
        let expense_ratio = expense_ratio(total_income, total_expenses, expense_amount);
        Self {
            severity: classify(current_balance, expense_amount, expense_ratio),
            current_balance,
            expense_ratio,
        }
    }

    pub fn can_afford(&self) -> bool {
        self.severity == Severity::Success
    }
}

/// Picks the text shown for a tier.
pub trait MessagePicker: Send + Sync + fmt::Debug {
    fn pick(&self, severity: Severity) -> String;
}

/// Uniform random pick from the tier's pool.
#[derive(Debug)]
pub struct RandomPicker {
    rng: Mutex<StdRng>,
}

impl RandomPicker {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic sequence of picks for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl MessagePicker for RandomPicker {
    fn pick(&self, severity: Severity) -> String {
        let pool = severity.messages();
        let index = self
            .rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .gen_range(0..pool.len());
        pool[index].to_string()
    }
}

/// Always the first message of the tier.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstMessagePicker;

impl MessagePicker for FirstMessagePicker {
    fn pick(&self, severity: Severity) -> String {
        severity.messages()[0].to_string()
    }
}

/// Advice for a prospective expense.
#[derive(Clone, Debug, PartialEq)]
pub struct Advice {
    pub message: String,
    pub assessment: Assessment,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_income_means_fully_committed() {
        assert_eq!(expense_ratio(0.0, 0.0, 250.0), 1.0);
        assert_eq!(expense_ratio(0.0, 900.0, 0.0), 1.0);
    }

    #[test]
    fn non_positive_balance_is_danger() {
        assert_eq!(classify(0.0, 0.0, 0.0), Severity::Danger);
        assert_eq!(classify(-10.0, 1.0, 0.1), Severity::Danger);
    }

    #[test]
    fn half_of_balance_is_danger() {
        // income 1000, expenses 900
        let assessment = Assessment::new(1000.0, 900.0, 500.0);
        assert_eq!(assessment.current_balance, 100.0);
        assert_eq!(assessment.severity, Severity::Danger);
        assert!(!assessment.can_afford());
    }

    #[test]
    fn tight_budget_is_warning() {
        // ratio (2000 + 400) / 3000 = 0.8
        let assessment = Assessment::new(3000.0, 2000.0, 400.0);
        assert_eq!(assessment.severity, Severity::Warning);
    }

    #[test]
    fn fifth_of_balance_is_warning() {
        // ratio stays low, but 300 > 1000 * 0.2
        assert_eq!(classify(1000.0, 300.0, 0.1), Severity::Warning);
        assert_eq!(classify(1000.0, 200.0, 0.1), Severity::Success);
    }

    #[test]
    fn comfortable_expense_is_success() {
        let assessment = Assessment::new(5000.0, 1000.0, 500.0);
        assert_eq!(assessment.severity, Severity::Success);
        assert!(assessment.can_afford());
        assert_eq!(assessment.expense_ratio, 0.3);
    }

    #[test]
    fn classification_ignores_the_picker() {
        let a = Assessment::new(1200.0, 400.0, 100.0);
        let b = Assessment::new(1200.0, 400.0, 100.0);
        assert_eq!(a, b);
    }

    #[test]
    fn seeded_picker_is_repeatable_and_stays_in_the_pool() {
        let a = RandomPicker::seeded(7);
        let b = RandomPicker::seeded(7);
        for severity in [Severity::Success, Severity::Warning, Severity::Danger] {
            for _ in 0..5 {
                let message = a.pick(severity);
                assert_eq!(message, b.pick(severity));
                assert!(severity.messages().contains(&message.as_str()));
            }
        }
    }
}
