use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::db::LoanRecord;
use crate::domain::{self, BookCategory, LoanState, UserType};
use crate::entities::{books, fines, users};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UserDto {
    pub id: i32,
    pub national_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub user_type: UserType,
    pub blocked: bool,
    pub loan_days: i64,
    pub registered_at: String,
}

impl From<users::Model> for UserDto {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id,
            loan_days: user.user_type.loan_days(),
            national_id: user.national_id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            user_type: user.user_type,
            blocked: user.blocked,
            registered_at: user.registered_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BookDto {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub year: i32,
    pub category: BookCategory,
    pub total_stock: i32,
    pub available_stock: i32,
    pub available: bool,
}

impl From<books::Model> for BookDto {
    fn from(book: books::Model) -> Self {
        Self {
            available: book.is_available(),
            isbn: book.isbn,
            title: book.title,
            author: book.author,
            publisher: book.publisher,
            year: book.year,
            category: book.category,
            total_stock: book.total_stock,
            available_stock: book.available_stock,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FineDto {
    pub id: i32,
    pub loan_id: i32,
    pub overdue_days: i32,
    pub daily_rate: i32,
    pub total_amount: i64,
    pub paid: bool,
    pub generated_at: String,
    pub paid_at: Option<String>,
}

impl From<fines::Model> for FineDto {
    fn from(fine: fines::Model) -> Self {
        Self {
            id: fine.id,
            loan_id: fine.loan_id,
            overdue_days: fine.overdue_days,
            daily_rate: fine.daily_rate,
            total_amount: fine.total_amount,
            paid: fine.paid,
            generated_at: fine.generated_at.to_rfc3339(),
            paid_at: fine.paid_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// A loan as clients see it, with the borrower's name, the book title and the
/// lateness derived for `today`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoanDto {
    pub id: i32,
    pub user_id: i32,
    pub user_name: String,
    pub book_isbn: String,
    pub book_title: String,
    pub loaned_at: String,
    pub expected_return_date: NaiveDate,
    pub actual_return_date: Option<NaiveDate>,
    pub state: LoanState,
    pub renewed: bool,
    pub overdue_days: i64,
    pub fine: Option<FineDto>,
}

impl LoanDto {
    #[must_use]
    pub fn from_record(record: LoanRecord, today: NaiveDate) -> Self {
        let LoanRecord {
            loan,
            user,
            book,
            fine,
        } = record;

        Self {
            overdue_days: domain::overdue_days(
                loan.state,
                loan.expected_return_date,
                loan.actual_return_date,
                today,
            ),
            id: loan.id,
            user_id: loan.user_id,
            user_name: user.map(|u| u.name).unwrap_or_default(),
            book_isbn: loan.book_isbn,
            book_title: book.map(|b| b.title).unwrap_or_default(),
            loaned_at: loan.loaned_at.to_rfc3339(),
            expected_return_date: loan.expected_return_date,
            actual_return_date: loan.actual_return_date,
            state: loan.state,
            renewed: loan.renewed,
            fine: fine.map(FineDto::from),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MessageDto {
    pub message: String,
}

impl MessageDto {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthDto {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub database: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::loans;
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_loan_dto_reports_lateness_for_active_loan() {
        let record = LoanRecord {
            loan: loans::Model {
                id: 3,
                user_id: 1,
                book_isbn: "9780132350884".to_string(),
                loaned_at: Utc::now(),
                expected_return_date: date(2024, 1, 15),
                actual_return_date: None,
                state: LoanState::Active,
                renewed: false,
            },
            user: None,
            book: None,
            fine: None,
        };

        let dto = LoanDto::from_record(record, date(2024, 1, 20));
        assert_eq!(dto.overdue_days, 5);
        assert_eq!(dto.user_name, "");
        assert!(dto.fine.is_none());
    }

    #[test]
    fn test_error_envelope_omits_data() {
        let body = serde_json::to_value(ApiResponse::<()>::error("already paid")).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "already paid");
        assert!(body.get("data").is_none());
    }
}
