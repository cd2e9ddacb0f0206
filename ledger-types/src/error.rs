//! Error types for the ledger core.

use crate::domain::{AccountId, Currency, TransactionId};

/// Domain-level errors (business rule violations inside the value types).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Amount cannot be negative")]
    NegativeAmount,

    #[error("Amount overflows the minor-unit range")]
    AmountOverflow,

    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: Currency, got: Currency },

    #[error("Insufficient funds: available {available}, requested {requested}")]
    InsufficientFunds { available: i64, requested: i64 },

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Store-level errors (data access and compare-and-update outcomes).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    #[error("Transaction not found: {0}")]
    TransactionNotFound(TransactionId),

    #[error("Balance changed concurrently for account {0}")]
    BalanceConflict(AccountId),

    #[error("Duplicate identity: {0}")]
    DuplicateId(String),

    #[error("Storage error: {0}")]
    Backend(String),
}

/// Caller-facing errors for the service operations.
///
/// Every failure here is terminal for the operation that produced it; the
/// services retry `BalanceConflict` internally and only surface
/// `ConcurrentUpdateConflict` once retries are exhausted.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    #[error("Transaction not found: {0}")]
    TransactionNotFound(TransactionId),

    #[error("Account is inactive: {0}")]
    AccountInactive(AccountId),

    #[error("Amount must be positive")]
    InvalidAmount,

    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: Currency, got: Currency },

    #[error("Insufficient funds: available {available}, requested {requested}")]
    InsufficientFunds { available: i64, requested: i64 },

    #[error("Invalid transfer: {0}")]
    InvalidTransfer(String),

    #[error("Concurrent update conflict on account {0}")]
    ConcurrentUpdateConflict(AccountId),

    #[error("Timed out waiting to lock account {0}")]
    OperationTimeout(AccountId),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<DomainError> for LedgerError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NegativeAmount => LedgerError::InvalidAmount,
            DomainError::AmountOverflow => {
                LedgerError::Validation("amount overflows the minor-unit range".into())
            }
            DomainError::CurrencyMismatch { expected, got } => {
                LedgerError::CurrencyMismatch { expected, got }
            }
            DomainError::InsufficientFunds {
                available,
                requested,
            } => LedgerError::InsufficientFunds {
                available,
                requested,
            },
            DomainError::Validation(msg) => LedgerError::Validation(msg),
        }
    }
}

impl From<StoreError> for LedgerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Domain(e) => e.into(),
            StoreError::AccountNotFound(id) => LedgerError::AccountNotFound(id),
            StoreError::TransactionNotFound(id) => LedgerError::TransactionNotFound(id),
            StoreError::BalanceConflict(id) => LedgerError::ConcurrentUpdateConflict(id),
            StoreError::DuplicateId(msg) => LedgerError::Storage(format!("duplicate id: {msg}")),
            StoreError::Backend(msg) => LedgerError::Storage(msg),
        }
    }
}
