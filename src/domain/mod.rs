//! Domain types for the circulation desk.
//!
//! The enums here are stored as short uppercase strings and travel over the
//! wire with the same spelling, so the API and the database agree on names.

pub mod circulation;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use circulation::{
    DEFAULT_DAILY_FINE_RATE, days_late, expected_return_date, fine_total, overdue_days,
    should_unblock,
};

/// Kind of library member. Decides how long a loan lasts.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    #[default]
    #[sea_orm(string_value = "STUDENT")]
    Student,
    #[sea_orm(string_value = "TEACHER")]
    Teacher,
    #[sea_orm(string_value = "LIBRARIAN")]
    Librarian,
}

impl UserType {
    /// Days a member of this type keeps a book before it is due.
    #[must_use]
    pub const fn loan_days(self) -> i64 {
        match self {
            Self::Teacher => circulation::TEACHER_LOAN_DAYS,
            Self::Student | Self::Librarian => circulation::STUDENT_LOAN_DAYS,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "STUDENT",
            Self::Teacher => "TEACHER",
            Self::Librarian => "LIBRARIAN",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookCategory {
    #[sea_orm(string_value = "PROGRAMMING")]
    Programming,
    #[sea_orm(string_value = "DATABASES")]
    Databases,
    #[sea_orm(string_value = "NETWORKS")]
    Networks,
    #[sea_orm(string_value = "OPERATING_SYSTEMS")]
    OperatingSystems,
    #[sea_orm(string_value = "MATHEMATICS")]
    Mathematics,
    #[default]
    #[sea_orm(string_value = "GENERAL")]
    General,
}

impl BookCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Programming => "PROGRAMMING",
            Self::Databases => "DATABASES",
            Self::Networks => "NETWORKS",
            Self::OperatingSystems => "OPERATING_SYSTEMS",
            Self::Mathematics => "MATHEMATICS",
            Self::General => "GENERAL",
        }
    }
}

impl fmt::Display for BookCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a loan is in its lifecycle.
///
/// `Overdue` is never written by the service itself; it only appears in data
/// loaded from elsewhere (the demo seed marks one loan that way).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanState {
    #[default]
    #[sea_orm(string_value = "ACTIVE")]
    Active,
    #[sea_orm(string_value = "RETURNED")]
    Returned,
    #[sea_orm(string_value = "OVERDUE")]
    Overdue,
}

impl LoanState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Returned => "RETURNED",
            Self::Overdue => "OVERDUE",
        }
    }
}

impl fmt::Display for LoanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Today's date on the desk's local calendar.
#[must_use]
pub fn today() -> Date {
    chrono::Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loan_days_by_user_type() {
        assert_eq!(UserType::Teacher.loan_days(), 14);
        assert_eq!(UserType::Student.loan_days(), 7);
        assert_eq!(UserType::Librarian.loan_days(), 7);
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(
            serde_json::to_string(&BookCategory::OperatingSystems).unwrap(),
            "\"OPERATING_SYSTEMS\""
        );
        let state: LoanState = serde_json::from_str("\"RETURNED\"").unwrap();
        assert_eq!(state, LoanState::Returned);
        assert_eq!(UserType::Teacher.to_string(), "TEACHER");
    }
}
