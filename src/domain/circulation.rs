//! Pure circulation rules: due dates, lateness, fines and blocking.
//!
//! Nothing here touches the database. Services load rows, call these
//! functions, and persist whatever they decide.

use chrono::{Duration, NaiveDate};

use super::{LoanState, UserType};

pub const STUDENT_LOAN_DAYS: i64 = 7;
pub const TEACHER_LOAN_DAYS: i64 = 14;

/// Per-day charge applied when no rate is configured.
pub const DEFAULT_DAILY_FINE_RATE: i32 = 1000;

#[must_use]
pub fn expected_return_date(loaned_on: NaiveDate, user_type: UserType) -> NaiveDate {
    loaned_on + Duration::days(user_type.loan_days())
}

/// Number of whole days `on` falls after `expected`, or `None` when on time.
#[must_use]
pub fn days_late(expected: NaiveDate, on: NaiveDate) -> Option<i64> {
    (on > expected).then(|| (on - expected).num_days())
}

/// Derived lateness of a loan as shown to clients.
///
/// Returned loans are measured against their actual return date, active ones
/// against `today`. Anything else reports zero.
#[must_use]
pub fn overdue_days(
    state: LoanState,
    expected: NaiveDate,
    actual: Option<NaiveDate>,
    today: NaiveDate,
) -> i64 {
    let late = match (state, actual) {
        (LoanState::Returned, Some(returned_on)) => days_late(expected, returned_on),
        (LoanState::Active, _) => days_late(expected, today),
        _ => None,
    };
    late.unwrap_or(0)
}

#[must_use]
pub fn fine_total(overdue_days: i32, daily_rate: i32) -> i64 {
    i64::from(overdue_days) * i64::from(daily_rate)
}

/// A member may borrow again once every fine they hold is paid.
///
/// Takes the `paid` flag of each of the member's remaining fines.
pub fn should_unblock<I>(paid_flags: I) -> bool
where
    I: IntoIterator<Item = bool>,
{
    paid_flags.into_iter().all(|paid| paid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_expected_return_date_teacher() {
        assert_eq!(
            expected_return_date(date(2024, 1, 1), UserType::Teacher),
            date(2024, 1, 15)
        );
    }

    #[test]
    fn test_expected_return_date_student_and_renewal() {
        let loaned = date(2024, 3, 1);
        let due = expected_return_date(loaned, UserType::Student);
        assert_eq!(due, date(2024, 3, 8));
        // A renewal pushes the due date by one more period.
        assert_eq!(
            due + Duration::days(UserType::Student.loan_days()),
            date(2024, 3, 15)
        );
    }

    #[test]
    fn test_days_late() {
        assert_eq!(days_late(date(2024, 1, 15), date(2024, 1, 20)), Some(5));
        assert_eq!(days_late(date(2024, 1, 15), date(2024, 1, 15)), None);
        assert_eq!(days_late(date(2024, 1, 15), date(2024, 1, 2)), None);
    }

    #[test]
    fn test_overdue_days_returned_late() {
        let days = overdue_days(
            LoanState::Returned,
            date(2024, 1, 15),
            Some(date(2024, 1, 20)),
            date(2024, 2, 1),
        );
        assert_eq!(days, 5);
    }

    #[test]
    fn test_overdue_days_returned_on_time() {
        let days = overdue_days(
            LoanState::Returned,
            date(2024, 1, 15),
            Some(date(2024, 1, 10)),
            date(2024, 2, 1),
        );
        assert_eq!(days, 0);
    }

    #[test]
    fn test_overdue_days_active_uses_today() {
        let expected = date(2024, 1, 15);
        assert_eq!(
            overdue_days(LoanState::Active, expected, None, date(2024, 1, 18)),
            3
        );
        assert_eq!(
            overdue_days(LoanState::Active, expected, None, date(2024, 1, 14)),
            0
        );
    }

    #[test]
    fn test_overdue_days_overdue_state_reports_zero() {
        assert_eq!(
            overdue_days(LoanState::Overdue, date(2024, 1, 15), None, date(2024, 2, 1)),
            0
        );
    }

    #[test]
    fn test_fine_total() {
        assert_eq!(fine_total(5, DEFAULT_DAILY_FINE_RATE), 5000);
        assert_eq!(fine_total(0, DEFAULT_DAILY_FINE_RATE), 0);
        assert_eq!(fine_total(i32::MAX, i32::MAX), 4_611_686_014_132_420_609);
    }

    #[test]
    fn test_should_unblock() {
        assert!(should_unblock(Vec::<bool>::new()));
        assert!(should_unblock([true, true]));
        assert!(!should_unblock([true, false]));
    }
}
