mod debit_card;
mod transaction;
mod user;

pub use debit_card::*;
pub use transaction::*;
pub use user::*;
