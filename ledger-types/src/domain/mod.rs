//! Pure domain types for the ledger core.

mod account;
mod money;
mod transaction;

pub use account::{Account, AccountId, AccountType, CustomerId};
pub use money::{Currency, Money};
pub use transaction::{Transaction, TransactionId, TransactionKind};
