//! # Ledger Core
//!
//! Application services for the ledger: account lifecycle and the
//! transaction engine. Both services are generic over the store ports,
//! so the adapter is injected at compile time and the services contain
//! no infrastructure logic.

mod account_service;
mod config;
mod locks;
mod transaction_service;


pub use account_service::AccountService;
pub use config::ServiceConfig;
pub use locks::AccountLocks;
pub use transaction_service::TransactionService;
