pub mod user_service;
pub mod user_service_impl;
pub use user_service::{UserError, UserService};
pub use user_service_impl::SeaOrmUserService;

pub mod book_service;
pub mod book_service_impl;
pub use book_service::{BookError, BookService};
pub use book_service_impl::SeaOrmBookService;

pub mod loan_service;
pub mod loan_service_impl;
pub use loan_service::{LoanError, LoanService};
pub use loan_service_impl::SeaOrmLoanService;

pub mod fine_service;
pub mod fine_service_impl;
pub use fine_service::{FineError, FineService};
pub use fine_service_impl::SeaOrmFineService;

pub mod scheduler;
pub use scheduler::Scheduler;

pub mod seed;
pub use seed::{SeedSummary, seed_demo};
