//! Account store port.

use crate::domain::{Account, AccountId, CustomerId, Money};
use crate::error::StoreError;

/// A conditional balance replacement: apply `new` only while the stored
/// balance still equals `expected`.
#[derive(Debug, Clone, Copy)]
pub struct BalanceUpdate {
    pub account_id: AccountId,
    pub expected: Money,
    pub new: Money,
}

/// Storage capability for accounts.
///
/// The compare-and-update primitives are the only way a balance changes
/// after creation. They apply the new balance only if the stored balance
/// still equals `expected`, which is what makes lost updates impossible:
/// a writer holding a stale read gets `BalanceConflict` instead of silently
/// overwriting a concurrent commit.
#[async_trait::async_trait]
pub trait AccountStore: Send + Sync + 'static {
    /// Persists a freshly created account.
    async fn create(&self, account: Account) -> Result<Account, StoreError>;

    /// Loads an account by id.
    async fn load(&self, id: AccountId) -> Result<Option<Account>, StoreError>;

    /// Atomically replaces the balance if it still equals `expected`.
    ///
    /// Fails with `StoreError::BalanceConflict` when the stored balance no
    /// longer matches, and `StoreError::AccountNotFound` when the account
    /// does not exist.
    async fn compare_and_update_balance(
        &self,
        id: AccountId,
        expected: Money,
        new: Money,
    ) -> Result<(), StoreError>;

    /// Atomically applies a debit and a credit as one unit: both balances
    /// change, or neither does. No reader may observe one applied without
    /// the other. The two updates must target distinct accounts.
    ///
    /// Fails with `StoreError::BalanceConflict` naming the first account
    /// whose stored balance no longer matches its `expected` value.
    async fn compare_and_update_balances(
        &self,
        debit: BalanceUpdate,
        credit: BalanceUpdate,
    ) -> Result<(), StoreError>;

    /// Marks an account inactive and returns the updated record.
    async fn deactivate(&self, id: AccountId) -> Result<Account, StoreError>;

    /// Lists a customer's accounts in creation order. Empty when none.
    async fn list_by_customer(&self, customer_id: &CustomerId)
    -> Result<Vec<Account>, StoreError>;

    /// Lists all accounts in creation order, as one consistent snapshot.
    async fn list_all(&self) -> Result<Vec<Account>, StoreError>;
}
