mod list;
mod overdue;
mod seed;

pub use list::{cmd_list_books, cmd_list_fines, cmd_list_loans, cmd_list_users};
pub use overdue::cmd_overdue;
pub use seed::cmd_seed;
