//! Expiry Module
//!
//! Defines when a stored object becomes stale.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

// == Expiry ==
/// Expiration policy attached to every stored object.
///
/// Comparisons use wall-clock time, so an expiry can flip early or late if the
/// system clock is adjusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Expiry {
    /// Object never expires
    #[default]
    Never,
    /// Object expires at the given instant
    At(DateTime<Utc>),
}

impl Expiry {
    // == Constructors ==
    /// Expires `seconds` from now. Lifetimes beyond the representable range
    /// become `Never`.
    pub fn seconds(seconds: i64) -> Self {
        Duration::try_seconds(seconds)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
            .map_or(Expiry::Never, Expiry::At)
    }

    /// Expires at an absolute instant.
    pub fn at(date: DateTime<Utc>) -> Self {
        Expiry::At(date)
    }

    // == Date ==
    /// Returns the expiration instant, or None for `Never`.
    pub fn date(&self) -> Option<DateTime<Utc>> {
        match self {
            Expiry::Never => None,
            Expiry::At(date) => Some(*date),
        }
    }

    // == Is Expired ==
    /// Checks the expiry against the current wall-clock time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Checks the expiry against `now`.
    ///
    /// An instant expiry counts as expired once `now` reaches it, so the
    /// boundary itself is already stale.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self {
            Expiry::Never => false,
            Expiry::At(date) => now >= *date,
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_is_not_expired() {
        let far_future = Utc::now() + Duration::days(365 * 100);
        assert!(!Expiry::Never.is_expired());
        assert!(!Expiry::Never.is_expired_at(far_future));
        assert!(Expiry::Never.date().is_none());
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = Utc::now();
        let expiry = Expiry::at(now);

        assert!(expiry.is_expired_at(now), "Expiry should be stale at boundary");
        assert!(!expiry.is_expired_at(now - Duration::milliseconds(1)));
        assert!(expiry.is_expired_at(now + Duration::milliseconds(1)));
    }

    #[test]
    fn test_seconds_in_future() {
        let expiry = Expiry::seconds(60);

        assert!(!expiry.is_expired());
        let date = expiry.date().unwrap();
        assert!(date > Utc::now() + Duration::seconds(59));
    }

    #[test]
    fn test_seconds_in_past() {
        assert!(Expiry::seconds(-1).is_expired());
    }

    #[test]
    fn test_seconds_out_of_range() {
        assert_eq!(Expiry::seconds(i64::MAX), Expiry::Never);
    }

    #[test]
    fn test_default_is_never() {
        assert_eq!(Expiry::default(), Expiry::Never);
    }
}
