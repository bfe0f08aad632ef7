//! The module contains the error the engine can throw.
//!
//! Business-rule failures are expected outcomes and carry the message shown
//! to the caller:
//!
//! - [`Unauthenticated`] thrown when an identity is missing or unknown.
//! - [`Validation`] thrown when a required field is missing or malformed.
//! - [`Conflict`] thrown when a username or email is already taken.
//! - [`NotFound`] thrown when a goal is not visible to the caller.
//! - [`InvalidAmount`] thrown when a funding amount is not positive.
//! - [`InsufficientFunds`] thrown when a funding exceeds the available balance.
//!
//! [`Internal`] and [`Database`] are unexpected store failures; their message
//! must never reach the caller verbatim.
//!
//!  [`Unauthenticated`]: EngineError::Unauthenticated
//!  [`Validation`]: EngineError::Validation
//!  [`Conflict`]: EngineError::Conflict
//!  [`NotFound`]: EngineError::NotFound
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InsufficientFunds`]: EngineError::InsufficientFunds
//!  [`Internal`]: EngineError::Internal
//!  [`Database`]: EngineError::Database
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0}")]
    Unauthenticated(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidAmount(String),
    #[error("{0}")]
    InsufficientFunds(String),
    #[error("internal error: {0}")]
    Internal(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl EngineError {
    /// Stable machine-readable identifier of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthenticated(_) => "unauthenticated",
            Self::Validation(_) => "validation_error",
            Self::Conflict(_) => "conflict",
            Self::NotFound(_) => "not_found",
            Self::InvalidAmount(_) => "invalid_amount",
            Self::InsufficientFunds(_) => "insufficient_funds",
            Self::Internal(_) | Self::Database(_) => "internal_error",
        }
    }

    /// `true` for failures that are part of the business rules.
    pub fn is_expected(&self) -> bool {
        !matches!(self, Self::Internal(_) | Self::Database(_))
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Unauthenticated(a), Self::Unauthenticated(b)) => a == b,
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::Conflict(a), Self::Conflict(b)) => a == b,
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InsufficientFunds(a), Self::InsufficientFunds(b)) => a == b,
            (Self::Internal(a), Self::Internal(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_caller_message() {
        let err = EngineError::InsufficientFunds("Insufficient balance".to_string());
        assert_eq!(err.to_string(), "Insufficient balance");
        assert_eq!(err.kind(), "insufficient_funds");
        assert!(err.is_expected());
    }

    #[test]
    fn store_failures_are_not_expected() {
        let err = EngineError::Database(DbErr::Custom("boom".to_string()));
        assert_eq!(err.kind(), "internal_error");
        assert!(!err.is_expected());
        assert!(!EngineError::Internal("x".to_string()).is_expected());
    }
}
