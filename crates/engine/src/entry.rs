//! Shared vocabulary of ledger entries (income and expenses).

use crate::{EngineError, ResultEngine};

/// Category used when a record carries none.
pub const DEFAULT_CATEGORY: &str = "other";

/// Whether an entry happens once or repeats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EntryType {
    #[default]
    OneTime,
    Recurring,
}

impl EntryType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OneTime => "one-time",
            Self::Recurring => "recurring",
        }
    }
}

impl TryFrom<&str> for EntryType {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "one-time" => Ok(Self::OneTime),
            "recurring" => Ok(Self::Recurring),
            other => Err(EngineError::Validation(format!(
                "invalid entry type: {other}"
            ))),
        }
    }
}

/// Returns the trimmed category, or [`DEFAULT_CATEGORY`] when blank.
pub fn category_or_default(category: Option<&str>) -> String {
    category
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CATEGORY)
        .to_string()
}

/// Amounts of income and expenses must be finite and non-negative.
pub(crate) fn validate_entry_amount(amount: f64) -> ResultEngine<f64> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(EngineError::Validation(
            "Amount must be a non-negative number".to_string(),
        ));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_type_parses_wire_names() {
        assert_eq!(EntryType::try_from("one-time").unwrap(), EntryType::OneTime);
        assert_eq!(
            EntryType::try_from("recurring").unwrap(),
            EntryType::Recurring
        );
        assert!(EntryType::try_from("weekly").is_err());
    }

    #[test]
    fn blank_category_falls_back_to_other() {
        assert_eq!(category_or_default(None), "other");
        assert_eq!(category_or_default(Some("   ")), "other");
        assert_eq!(category_or_default(Some(" food ")), "food");
    }

    #[test]
    fn entry_amount_rejects_negative_and_nan() {
        assert!(validate_entry_amount(-1.0).is_err());
        assert!(validate_entry_amount(f64::NAN).is_err());
        assert!(validate_entry_amount(f64::INFINITY).is_err());
        assert_eq!(validate_entry_amount(0.0).unwrap(), 0.0);
    }
}
