// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Advisory expiry classification.
//!
//! Classification is a pure function of the expiry date, today's date and
//! the warning window. It never deletes or moves anything.

use chrono::NaiveDate;

/// How an entry's expiry date relates to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpiryStatus {
    NoExpiry,
    Expired,
    /// Expires within the warning window; carries the days remaining.
    ExpiringSoon(i64),
    Valid,
}

impl std::fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpiryStatus::NoExpiry => f.write_str("NO EXPIRY"),
            ExpiryStatus::Expired => f.write_str("EXPIRED"),
            ExpiryStatus::ExpiringSoon(days) => write!(f, "EXPIRING: {days} DAYS"),
            ExpiryStatus::Valid => f.write_str("VALID"),
        }
    }
}

/// Classify `expires_at` relative to `today`.
///
/// Days remaining is the whole-day difference between the two calendar
/// dates, so an entry expiring today has 0 days left and is still
/// `ExpiringSoon(0)`; it becomes `Expired` the day after.
pub fn classify_expiry(expires_at: Option<NaiveDate>, today: NaiveDate, warning_days: i64) -> ExpiryStatus {
    let Some(expires_at) = expires_at else {
        return ExpiryStatus::NoExpiry;
    };
    let remaining = (expires_at - today).num_days();
    if remaining < 0 {
        ExpiryStatus::Expired
    } else if remaining <= warning_days {
        ExpiryStatus::ExpiringSoon(remaining)
    } else {
        ExpiryStatus::Valid
    }
}

/// Counts of active entries per expiry class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpiryReport {
    pub no_expiry: usize,
    pub expired: usize,
    pub expiring_soon: usize,
    pub valid: usize,
}

impl ExpiryReport {
    pub fn record(&mut self, status: ExpiryStatus) {
        match status {
            ExpiryStatus::NoExpiry => self.no_expiry += 1,
            ExpiryStatus::Expired => self.expired += 1,
            ExpiryStatus::ExpiringSoon(_) => self.expiring_soon += 1,
            ExpiryStatus::Valid => self.valid += 1,
        }
    }

    /// Entries that need attention.
    pub fn flagged(&self) -> usize {
        self.expired + self.expiring_soon
    }
}

#[cfg(test)]
mod tests {
    use chrono::Days;
    use proptest::prelude::*;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
    }

    #[test]
    fn three_days_out_is_expiring_soon() {
        let at = today().checked_add_days(Days::new(3));
        assert_eq!(classify_expiry(at, today(), 7), ExpiryStatus::ExpiringSoon(3));
    }

    #[test]
    fn yesterday_is_expired() {
        let at = today().checked_sub_days(Days::new(1));
        assert_eq!(classify_expiry(at, today(), 7), ExpiryStatus::Expired);
    }

    #[test]
    fn today_is_still_expiring() {
        assert_eq!(classify_expiry(Some(today()), today(), 7), ExpiryStatus::ExpiringSoon(0));
    }

    #[test]
    fn window_edges() {
        let seven = today().checked_add_days(Days::new(7));
        let eight = today().checked_add_days(Days::new(8));
        assert_eq!(classify_expiry(seven, today(), 7), ExpiryStatus::ExpiringSoon(7));
        assert_eq!(classify_expiry(eight, today(), 7), ExpiryStatus::Valid);
    }

    #[test]
    fn missing_date_has_no_expiry() {
        assert_eq!(classify_expiry(None, today(), 7), ExpiryStatus::NoExpiry);
    }

    #[test]
    fn labels() {
        assert_eq!(ExpiryStatus::ExpiringSoon(3).to_string(), "EXPIRING: 3 DAYS");
        assert_eq!(ExpiryStatus::Expired.to_string(), "EXPIRED");
    }

    #[test]
    fn report_counts_flagged() {
        let mut report = ExpiryReport::default();
        report.record(ExpiryStatus::Expired);
        report.record(ExpiryStatus::ExpiringSoon(1));
        report.record(ExpiryStatus::Valid);
        report.record(ExpiryStatus::NoExpiry);
        assert_eq!(report.flagged(), 2);
        assert_eq!(report.valid, 1);
    }

    proptest! {
        #[test]
        fn classification_is_idempotent(offset in -400i64..400, window in 0i64..30) {
            let at = today() + chrono::Duration::days(offset);
            let first = classify_expiry(Some(at), today(), window);
            let second = classify_expiry(Some(at), today(), window);
            prop_assert_eq!(first, second);
        }
    }
}
