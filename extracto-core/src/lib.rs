//! extracto-core: transaction types and the text utilities shared by every statement dialect

pub mod amount;
pub mod dates;
pub mod description;
pub mod diagnostics;
pub mod error;
pub mod transaction;

pub use amount::{AmountError, amount_or_zero, parse_amount};
pub use dates::{CANONICAL_FORMAT, DateFormat, parse_date, reformat_date};
pub use description::{Delimiter, collapse_whitespace, split_description};
pub use diagnostics::{Diagnostics, Warning, WarningKind};
pub use error::{Error, Result};
pub use transaction::{MovementKind, Transaction, ZeroAmountPolicy};
