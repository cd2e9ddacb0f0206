//! Account lifecycle and balance queries.
//!
//! Orchestrates account operations through the `AccountStore` port.
//! Balance mutation is NOT done here; only the transaction service moves
//! money, and only through the store's compare-and-update primitive.

use std::sync::Arc;

use ledger_types::{
    Account, AccountId, AccountStore, AccountType, CustomerId, LedgerError, Money,
};

use crate::locks::AccountLocks;

/// Application service for account lifecycle operations.
///
/// Generic over `S: AccountStore` - the adapter is injected at compile time.
/// Shares the per-account lock registry with the transaction service, so a
/// lifecycle change cannot interleave with an in-flight balance commit.
pub struct AccountService<S: AccountStore> {
    store: Arc<S>,
    locks: Arc<AccountLocks>,
}

impl<S: AccountStore> AccountService<S> {
    /// Creates a new account service with the given store and lock registry.
    pub fn new(store: Arc<S>, locks: Arc<AccountLocks>) -> Self {
        Self { store, locks }
    }

    /// Returns a handle to the underlying store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Opens a new active account with the given initial balance.
    ///
    /// `Money` cannot be negative by construction, so an invalid initial
    /// balance is rejected before this call can be made.
    pub async fn create_account(
        &self,
        customer_id: CustomerId,
        account_type: AccountType,
        initial_balance: Money,
    ) -> Result<Account, LedgerError> {
        let account = Account::new(customer_id, account_type, initial_balance);
        let account = self.store.create(account).await?;

        tracing::info!(
            account_id = %account.id,
            customer_id = %account.customer_id,
            account_type = %account.account_type,
            balance = %account.balance,
            "account created"
        );
        Ok(account)
    }

    /// Gets an account by ID.
    pub async fn get_account(&self, id: AccountId) -> Result<Account, LedgerError> {
        self.store
            .load(id)
            .await?
            .ok_or(LedgerError::AccountNotFound(id))
    }

    /// Lists a customer's accounts in creation order. Empty when none.
    pub async fn get_accounts_by_customer(
        &self,
        customer_id: &CustomerId,
    ) -> Result<Vec<Account>, LedgerError> {
        self.store
            .list_by_customer(customer_id)
            .await
            .map_err(Into::into)
    }

    /// Lists all accounts in creation order.
    pub async fn get_all_accounts(&self) -> Result<Vec<Account>, LedgerError> {
        self.store.list_all().await.map_err(Into::into)
    }

    /// Returns the current balance of an account.
    pub async fn get_balance(&self, id: AccountId) -> Result<Money, LedgerError> {
        Ok(self.get_account(id).await?.balance)
    }

    /// Marks an account inactive. Terminal: the account keeps its balance
    /// and history but accepts no further deposits, withdrawals, or
    /// transfers.
    ///
    /// Holds the account's write lock, so any in-flight balance operation
    /// finishes first and every later one revalidates against the flag.
    pub async fn deactivate_account(&self, id: AccountId) -> Result<Account, LedgerError> {
        let _guard = self.locks.acquire(id).await?;
        let account = self.store.deactivate(id).await?;
        tracing::info!(account_id = %account.id, "account deactivated");
        Ok(account)
    }
}
