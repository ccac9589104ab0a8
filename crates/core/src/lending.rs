//! Borrow/return rules for the loan lifecycle.
//!
//! A loan is `Open` from creation (no return date) and becomes `Closed`
//! exactly once when the book is returned; `Closed` is terminal. The
//! stateful transition itself lives in `pustaka-db::repositories::
//! TransactionRepo`; this module holds the pure rules it applies.

use chrono::NaiveDate;
use rand::Rng;

use crate::error::CoreError;

/// Maximum loan window in days, bounds inclusive.
pub const MAX_LOAN_DAYS: i64 = 32;

/// Fixed fee charged for returning a book after its due date.
pub const LATE_PENALTY: i32 = 50_000;

/// Description attached to a late-return penalty.
pub const LATE_PENALTY_DESC: &str = "Denda karena telat mengembalikan buku";

/// Validate a requested borrow window.
///
/// The window must not be inverted and must not exceed [`MAX_LOAN_DAYS`].
pub fn validate_loan_window(date_from: NaiveDate, date_to: NaiveDate) -> Result<(), CoreError> {
    let days = (date_to - date_from).num_days();
    if days < 0 {
        return Err(CoreError::Validation(
            "Tanggal pemulangan tidak boleh sebelum tanggal peminjaman".into(),
        ));
    }
    if days > MAX_LOAN_DAYS {
        return Err(CoreError::Validation(
            "Waktu peminjaman buku tidak boleh lebih dari 1 bulan".into(),
        ));
    }
    Ok(())
}

/// Compute the penalty for returning on `return_date` a loan due on `date_to`.
///
/// Strictly after the due date means late; returning on the due date itself
/// is free. Comparison is at calendar-date precision.
pub fn compute_penalty(date_to: NaiveDate, return_date: NaiveDate) -> (i32, Option<&'static str>) {
    if return_date > date_to {
        (LATE_PENALTY, Some(LATE_PENALTY_DESC))
    } else {
        (0, None)
    }
}

/// Days remaining until the due date, negative once overdue.
pub fn days_until_due(date_to: NaiveDate, today: NaiveDate) -> i64 {
    (date_to - today).num_days()
}

/// Generate a human-facing loan code: a random numeric string in
/// `[1_000_000, 91_000_000)`.
///
/// Uniqueness is enforced by a unique index on `transactions.code`; callers
/// retry on collision.
pub fn generate_transaction_code() -> String {
    rand::rng().random_range(1_000_000u32..91_000_000).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().expect("valid test date")
    }

    #[test]
    fn window_within_limit_is_accepted() {
        assert!(validate_loan_window(d("2024-01-01"), d("2024-01-10")).is_ok());
        // Exactly at the 32-day boundary.
        assert!(validate_loan_window(d("2024-01-01"), d("2024-02-02")).is_ok());
        // Same-day loan.
        assert!(validate_loan_window(d("2024-01-01"), d("2024-01-01")).is_ok());
    }

    #[test]
    fn window_beyond_limit_is_rejected() {
        let err = validate_loan_window(d("2024-01-01"), d("2024-02-03")).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn inverted_window_is_rejected() {
        let err = validate_loan_window(d("2024-01-10"), d("2024-01-01")).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn late_return_incurs_fixed_penalty() {
        let (penalty, desc) = compute_penalty(d("2024-01-10"), d("2024-01-15"));
        assert_eq!(penalty, LATE_PENALTY);
        assert_eq!(desc, Some(LATE_PENALTY_DESC));
    }

    #[test]
    fn on_time_return_is_free() {
        // On the due date itself.
        let (penalty, desc) = compute_penalty(d("2024-01-10"), d("2024-01-10"));
        assert_eq!(penalty, 0);
        assert!(desc.is_none());

        // Before the due date.
        let (penalty, _) = compute_penalty(d("2024-01-10"), d("2024-01-05"));
        assert_eq!(penalty, 0);
    }

    #[test]
    fn days_until_due_goes_negative_when_overdue() {
        assert_eq!(days_until_due(d("2024-01-10"), d("2024-01-05")), 5);
        assert_eq!(days_until_due(d("2024-01-10"), d("2024-01-10")), 0);
        assert_eq!(days_until_due(d("2024-01-10"), d("2024-01-15")), -5);
    }

    #[test]
    fn transaction_code_is_in_range() {
        for _ in 0..100 {
            let code = generate_transaction_code();
            let n: u32 = code.parse().expect("code must be numeric");
            assert!((1_000_000..91_000_000).contains(&n), "code {n} out of range");
        }
    }
}
