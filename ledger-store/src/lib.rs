//! # Ledger Store
//!
//! Concrete store implementations (adapters) for the ledger core.
//! This crate provides the in-memory adapters that implement the
//! `AccountStore` and `TransactionStore` ports.

mod memory;

#[cfg(test)]
mod memory_tests;

pub use memory::{MemoryAccountStore, MemoryTransactionStore};
