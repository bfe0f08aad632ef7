//! Internal helpers for input normalization and per-key serialization.
//!
//! These utilities are **not** part of the public API.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

/// Trimmed text, or `None` when blank.
pub(crate) fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// One async mutex per key.
///
/// Holding the guard of a key serializes every read-modify-write cycle
/// performed under that key. Entries nobody holds are dropped on the next
/// lookup, so the map only keeps keys with work in flight.
#[derive(Debug, Default)]
pub(crate) struct KeyedLocks {
    locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl KeyedLocks {
    pub(crate) fn for_key(&self, key: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        locks.entry(key.to_string()).or_default().clone()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_dropped() {
        assert_eq!(normalize_optional_text(None), None);
        assert_eq!(normalize_optional_text(Some("  ")), None);
        assert_eq!(
            normalize_optional_text(Some(" Salary ")),
            Some("Salary".to_string())
        );
    }

    #[test]
    fn same_key_shares_a_lock() {
        let locks = KeyedLocks::default();
        let a = locks.for_key("user_1");
        let b = locks.for_key("user_1");
        let c = locks.for_key("user_2");
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
    }

    #[test]
    fn released_keys_are_pruned() {
        let locks = KeyedLocks::default();
        let held = locks.for_key("user_1");
        drop(locks.for_key("user_2"));
        drop(locks.for_key("user_3"));
        assert_eq!(locks.len(), 2);

        let again = locks.for_key("user_1");
        assert!(Arc::ptr_eq(&held, &again));
        assert_eq!(locks.len(), 1);
    }
}
