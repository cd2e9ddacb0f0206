//! # Ledger Types
//!
//! Domain types and port traits for the ledger core.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate is the innermost layer:
//! - `domain/` - Pure domain types (Money, Account, Transaction)
//! - `ports/` - Store trait definitions that adapters must implement
//! - `error/` - Domain, store, and service error types

pub mod domain;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    Account, AccountId, AccountType, Currency, CustomerId, Money, Transaction, TransactionId,
    TransactionKind,
};
pub use error::{DomainError, LedgerError, StoreError};
pub use ports::{AccountStore, BalanceUpdate, TransactionStore};
