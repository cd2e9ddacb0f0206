//! In-memory store adapters.
//!
//! Accounts live behind one `RwLock`: readers and single-account updates
//! see entry-consistent state, a transfer's paired update holds the write
//! lock for both changes at once, and `list_all` is a consistent snapshot.
//! The transaction store is append-only with fresh identities, so it stays
//! on lock-free `DashMap`.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use dashmap::DashMap;

use ledger_types::{
    Account, AccountId, AccountStore, BalanceUpdate, CustomerId, Money, StoreError, Transaction,
    TransactionId, TransactionStore,
};

// ─────────────────────────────────────────────────────────────────────────────
// Account store
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct AccountsInner {
    by_id: HashMap<AccountId, Account>,
    /// Insertion order, so listings come back in creation order.
    creation_order: Vec<AccountId>,
}

/// In-memory `AccountStore` implementation.
#[derive(Default)]
pub struct MemoryAccountStore {
    inner: RwLock<AccountsInner>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Poisoning only means another writer panicked mid-call; every mutation
    // here writes whole records, so the map stays coherent and we keep going.
    fn read(&self) -> RwLockReadGuard<'_, AccountsInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, AccountsInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn create(&self, account: Account) -> Result<Account, StoreError> {
        let id = account.id;
        let mut inner = self.write();
        if inner.by_id.contains_key(&id) {
            return Err(StoreError::DuplicateId(id.to_string()));
        }
        inner.by_id.insert(id, account.clone());
        inner.creation_order.push(id);
        tracing::debug!(account_id = %id, "account persisted");
        Ok(account)
    }

    async fn load(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        Ok(self.read().by_id.get(&id).cloned())
    }

    async fn compare_and_update_balance(
        &self,
        id: AccountId,
        expected: Money,
        new: Money,
    ) -> Result<(), StoreError> {
        let mut inner = self.write();
        let account = inner
            .by_id
            .get_mut(&id)
            .ok_or(StoreError::AccountNotFound(id))?;
        if account.balance != expected {
            tracing::warn!(account_id = %id, "balance conflict on compare-and-update");
            return Err(StoreError::BalanceConflict(id));
        }
        account.balance = new;
        Ok(())
    }

    async fn compare_and_update_balances(
        &self,
        debit: BalanceUpdate,
        credit: BalanceUpdate,
    ) -> Result<(), StoreError> {
        let mut inner = self.write();

        // Verify both expectations before touching either balance.
        for update in [&debit, &credit] {
            let account = inner
                .by_id
                .get(&update.account_id)
                .ok_or(StoreError::AccountNotFound(update.account_id))?;
            if account.balance != update.expected {
                tracing::warn!(
                    account_id = %update.account_id,
                    "balance conflict on paired compare-and-update"
                );
                return Err(StoreError::BalanceConflict(update.account_id));
            }
        }

        for update in [debit, credit] {
            if let Some(account) = inner.by_id.get_mut(&update.account_id) {
                account.balance = update.new;
            }
        }
        Ok(())
    }

    async fn deactivate(&self, id: AccountId) -> Result<Account, StoreError> {
        let mut inner = self.write();
        let account = inner
            .by_id
            .get_mut(&id)
            .ok_or(StoreError::AccountNotFound(id))?;
        account.deactivate();
        Ok(account.clone())
    }

    async fn list_by_customer(
        &self,
        customer_id: &CustomerId,
    ) -> Result<Vec<Account>, StoreError> {
        let inner = self.read();
        let accounts = inner
            .creation_order
            .iter()
            .filter_map(|id| inner.by_id.get(id))
            .filter(|account| &account.customer_id == customer_id)
            .cloned()
            .collect();
        Ok(accounts)
    }

    async fn list_all(&self) -> Result<Vec<Account>, StoreError> {
        let inner = self.read();
        let accounts = inner
            .creation_order
            .iter()
            .filter_map(|id| inner.by_id.get(id))
            .cloned()
            .collect();
        Ok(accounts)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Transaction store
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory `TransactionStore` implementation. Append-only.
#[derive(Default)]
pub struct MemoryTransactionStore {
    transactions: DashMap<TransactionId, Transaction>,
    /// Per-account index in append order.
    by_account: DashMap<AccountId, Vec<TransactionId>>,
}

impl MemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionStore for MemoryTransactionStore {
    async fn append(&self, transaction: Transaction) -> Result<Transaction, StoreError> {
        let id = transaction.id;
        if self.transactions.contains_key(&id) {
            return Err(StoreError::DuplicateId(id.to_string()));
        }
        self.transactions.insert(id, transaction.clone());
        self.by_account
            .entry(transaction.account_id)
            .or_default()
            .push(id);
        Ok(transaction)
    }

    async fn load(&self, id: TransactionId) -> Result<Option<Transaction>, StoreError> {
        Ok(self.transactions.get(&id).map(|entry| entry.clone()))
    }

    async fn list_by_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<Transaction>, StoreError> {
        let ids = match self.by_account.get(&account_id) {
            Some(entry) => entry.clone(),
            None => return Ok(Vec::new()),
        };
        let mut records: Vec<Transaction> = ids
            .into_iter()
            .filter_map(|id| self.transactions.get(&id).map(|entry| entry.clone()))
            .collect();
        // Stable sort: entries sharing a timestamp keep append order.
        records.sort_by_key(|tx| tx.timestamp);
        Ok(records)
    }
}
