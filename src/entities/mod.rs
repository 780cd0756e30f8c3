pub mod prelude;

pub mod books;
pub mod fines;
pub mod loans;
pub mod users;
