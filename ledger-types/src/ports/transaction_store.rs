//! Transaction store port.

use crate::domain::{AccountId, Transaction, TransactionId};
use crate::error::StoreError;

/// Append-only storage capability for ledger records.
///
/// Every record targets a fresh identity, so concurrent appends never race
/// on shared state.
#[async_trait::async_trait]
pub trait TransactionStore: Send + Sync + 'static {
    /// Appends a new ledger record. Records are immutable once appended.
    async fn append(&self, transaction: Transaction) -> Result<Transaction, StoreError>;

    /// Loads a record by id.
    async fn load(&self, id: TransactionId) -> Result<Option<Transaction>, StoreError>;

    /// Lists an account's records, ordered by timestamp ascending.
    async fn list_by_account(&self, account_id: AccountId)
    -> Result<Vec<Transaction>, StoreError>;
}
