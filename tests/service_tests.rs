use biblioteca::config::Config;
use biblioteca::db::Store;
use biblioteca::domain::{self, LoanState, UserType};
use biblioteca::services::book_service::CreateBookRequest;
use biblioteca::services::loan_service::CreateLoanRequest;
use biblioteca::services::user_service::CreateUserRequest;
use biblioteca::services::{LoanError, UserError, seed_demo};
use biblioteca::state::SharedState;
use chrono::Duration;

async fn setup() -> SharedState {
    setup_with(Config::default()).await
}

async fn setup_with(mut config: Config) -> SharedState {
    let db_path =
        std::env::temp_dir().join(format!("biblioteca_svc_{}.db", uuid::Uuid::new_v4()));
    config.general.database_path = format!("sqlite:{}", db_path.display());

    let store = Store::new(&config.general.database_path)
        .await
        .expect("Failed to open store");
    SharedState::with_store(store, config)
}

fn member(national_id: &str, user_type: UserType) -> CreateUserRequest {
    CreateUserRequest {
        national_id: national_id.to_string(),
        name: format!("Member {national_id}"),
        email: format!("{national_id}@mail.com"),
        phone: String::new(),
        user_type,
    }
}

fn book(isbn: &str, stock: i32) -> CreateBookRequest {
    CreateBookRequest {
        isbn: isbn.to_string(),
        title: format!("Book {isbn}"),
        author: "Author".to_string(),
        publisher: "Addison-Wesley".to_string(),
        year: 2020,
        category: Default::default(),
        total_stock: stock,
        available_stock: None,
    }
}

fn loan(user_id: i32, isbn: &str, due: Option<chrono::NaiveDate>) -> CreateLoanRequest {
    CreateLoanRequest {
        user_id,
        book_isbn: isbn.to_string(),
        expected_return_date: due,
    }
}

#[tokio::test]
async fn test_seed_demo_loads_reference_data() {
    let state = setup().await;

    let summary = seed_demo(&state.store, false).await.unwrap();
    assert_eq!(summary.users, 3);
    assert_eq!(summary.books, 5);
    assert_eq!(summary.loans, 2);

    let loans = state.loan_service.list().await.unwrap();
    assert_eq!(loans.len(), 2);

    let late = loans
        .iter()
        .find(|l| l.state == LoanState::Overdue)
        .expect("seed marks one loan overdue");
    assert_eq!(late.user_name, "Carlos López");
    assert_eq!(
        late.expected_return_date,
        domain::today() - Duration::days(5)
    );

    let effective_java = state.book_service.get("9780134685991").await.unwrap();
    assert_eq!(effective_java.available_stock, 2);

    // Reseeding wipes first, so counts stay the same.
    seed_demo(&state.store, false).await.unwrap();
    assert_eq!(state.user_service.list().await.unwrap().len(), 3);
    assert_eq!(state.loan_service.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_returning_seeded_overdue_loan_raises_fine() {
    let state = setup().await;
    seed_demo(&state.store, false).await.unwrap();

    let late = state
        .loan_service
        .list()
        .await
        .unwrap()
        .into_iter()
        .find(|l| l.state == LoanState::Overdue)
        .unwrap();

    let returned = state.loan_service.return_loan(late.id).await.unwrap();
    let fine = returned.fine.expect("late return raises a fine");
    assert_eq!(fine.overdue_days, 5);
    assert_eq!(fine.total_amount, 5000);

    let borrower = state.user_service.get(late.user_id).await.unwrap();
    assert!(borrower.blocked);
}

#[tokio::test]
async fn test_configured_fine_rate_applies() {
    let mut config = Config::default();
    config.circulation.daily_fine_rate = 300;
    let state = setup_with(config).await;

    let user = state
        .user_service
        .create(member("12345678-9", UserType::Student))
        .await
        .unwrap();
    state.book_service.create(book("9780134685991", 1)).await.unwrap();

    let due = domain::today() - Duration::days(2);
    let opened = state
        .loan_service
        .create(loan(user.id, "9780134685991", Some(due)))
        .await
        .unwrap();

    let returned = state.loan_service.return_loan(opened.id).await.unwrap();
    let fine = returned.fine.unwrap();
    assert_eq!(fine.daily_rate, 300);
    assert_eq!(fine.total_amount, 600);
}

#[tokio::test]
async fn test_blocked_user_cannot_borrow() {
    let state = setup().await;

    let user = state
        .user_service
        .create(member("12345678-9", UserType::Teacher))
        .await
        .unwrap();
    state.book_service.create(book("9780134685991", 2)).await.unwrap();

    let due = domain::today() - Duration::days(1);
    let opened = state
        .loan_service
        .create(loan(user.id, "9780134685991", Some(due)))
        .await
        .unwrap();
    state.loan_service.return_loan(opened.id).await.unwrap();

    let err = state
        .loan_service
        .create(loan(user.id, "9780134685991", None))
        .await
        .unwrap_err();
    assert!(matches!(err, LoanError::UserBlocked));

    let stock = state.book_service.get("9780134685991").await.unwrap();
    assert_eq!(stock.available_stock, 2);
}

#[tokio::test]
async fn test_delete_user_returns_copies_to_shelf() {
    let state = setup().await;

    let user = state
        .user_service
        .create(member("12345678-9", UserType::Student))
        .await
        .unwrap();
    state.book_service.create(book("9780134685991", 1)).await.unwrap();
    state
        .loan_service
        .create(loan(user.id, "9780134685991", None))
        .await
        .unwrap();

    state.user_service.delete(user.id).await.unwrap();

    let stock = state.book_service.get("9780134685991").await.unwrap();
    assert_eq!(stock.available_stock, 1);
    assert!(state.loan_service.list().await.unwrap().is_empty());

    let err = state.user_service.delete(user.id).await.unwrap_err();
    assert!(matches!(err, UserError::NotFound(_)));
}

#[tokio::test]
async fn test_delete_book_releases_blocked_borrower() {
    let state = setup().await;

    let user = state
        .user_service
        .create(member("12345678-9", UserType::Student))
        .await
        .unwrap();
    state.book_service.create(book("9780134685991", 1)).await.unwrap();

    let due = domain::today() - Duration::days(3);
    let opened = state
        .loan_service
        .create(loan(user.id, "9780134685991", Some(due)))
        .await
        .unwrap();
    state.loan_service.return_loan(opened.id).await.unwrap();
    assert!(state.user_service.get(user.id).await.unwrap().blocked);

    state.book_service.delete("9780134685991").await.unwrap();

    assert!(!state.user_service.get(user.id).await.unwrap().blocked);
    assert!(state.fine_service.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_overdue_report_counts_active_late_loans() {
    let state = setup().await;

    let user = state
        .user_service
        .create(member("12345678-9", UserType::Student))
        .await
        .unwrap();
    state.book_service.create(book("9780134685991", 3)).await.unwrap();

    state
        .loan_service
        .create(loan(user.id, "9780134685991", Some(domain::today() - Duration::days(4))))
        .await
        .unwrap();
    state
        .loan_service
        .create(loan(user.id, "9780134685991", None))
        .await
        .unwrap();

    let overdue =
        biblioteca::services::scheduler::report_overdue(state.loan_service.as_ref())
            .await
            .unwrap();
    assert_eq!(overdue.len(), 1);
    assert_eq!(overdue[0].overdue_days, 4);

    // The report never rewrites loan state.
    let loans = state.loan_service.list().await.unwrap();
    assert!(loans.iter().all(|l| l.state == LoanState::Active));
}
