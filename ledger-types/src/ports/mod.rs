//! Store port traits.
//!
//! Adapters (in-memory, SQL, ...) implement these traits; the services
//! depend only on the contracts.

mod account_store;
mod transaction_store;

pub use account_store::{AccountStore, BalanceUpdate};
pub use transaction_store::TransactionStore;
