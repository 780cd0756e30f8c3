pub use super::books::Entity as Books;
pub use super::fines::Entity as Fines;
pub use super::loans::Entity as Loans;
pub use super::users::Entity as Users;
