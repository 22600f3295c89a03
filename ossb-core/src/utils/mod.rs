pub mod token_amount;

pub use token_amount::{TokenAmountError, to_base_units};
