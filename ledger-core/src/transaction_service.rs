//! The ledger engine: deposits, withdrawals, transfers, and history.
//!
//! Every mutating operation serializes on its per-account lock(s) from the
//! shared registry, then commits through the store's compare-and-update
//! primitives inside a bounded retry loop. A transfer's two balance changes
//! go through the store's paired compare-and-update, so no reader ever sees
//! the debit without the credit. The commit itself (balance change plus
//! ledger records) runs in a detached task that finishes even if the caller
//! goes away mid-operation.

use std::sync::Arc;

use ledger_types::{
    Account, AccountId, AccountStore, BalanceUpdate, LedgerError, Money, StoreError, Transaction,
    TransactionId, TransactionStore,
};

use crate::config::ServiceConfig;
use crate::locks::AccountLocks;

/// Application service for ledger operations.
///
/// Generic over the two store ports; owns the atomicity and concurrency
/// contracts.
pub struct TransactionService<A: AccountStore, T: TransactionStore> {
    accounts: Arc<A>,
    transactions: Arc<T>,
    locks: Arc<AccountLocks>,
    config: ServiceConfig,
}

impl<A: AccountStore, T: TransactionStore> TransactionService<A, T> {
    /// Creates a transaction service with default configuration.
    pub fn new(accounts: Arc<A>, transactions: Arc<T>, locks: Arc<AccountLocks>) -> Self {
        Self::with_config(accounts, transactions, locks, ServiceConfig::default())
    }

    /// Creates a transaction service with explicit configuration.
    pub fn with_config(
        accounts: Arc<A>,
        transactions: Arc<T>,
        locks: Arc<AccountLocks>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            accounts,
            transactions,
            locks,
            config,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mutating operations
    // ─────────────────────────────────────────────────────────────────────

    /// Deposits money into an account.
    pub async fn deposit(
        &self,
        account_id: AccountId,
        amount: Money,
        description: Option<String>,
    ) -> Result<Transaction, LedgerError> {
        if !amount.is_positive() {
            return Err(LedgerError::InvalidAmount);
        }

        let _guard = self.locks.acquire(account_id).await?;

        for _ in 0..self.config.max_balance_retries {
            let mut account = self.load_active(account_id).await?;
            let expected = account.balance;
            account.credit(amount)?;

            let record = Transaction::deposit(account_id, amount, description.clone());
            match self
                .commit_single(account_id, expected, account.balance, record)
                .await?
            {
                Some(record) => {
                    tracing::debug!(
                        account_id = %account_id,
                        transaction_id = %record.id,
                        amount = %amount,
                        balance = %account.balance,
                        "deposit committed"
                    );
                    return Ok(record);
                }
                None => {
                    tracing::warn!(account_id = %account_id, "deposit hit balance conflict, retrying");
                }
            }
        }

        Err(LedgerError::ConcurrentUpdateConflict(account_id))
    }

    /// Withdraws money from an account. Fails with `InsufficientFunds`
    /// rather than ever letting the balance go negative.
    pub async fn withdraw(
        &self,
        account_id: AccountId,
        amount: Money,
        description: Option<String>,
    ) -> Result<Transaction, LedgerError> {
        if !amount.is_positive() {
            return Err(LedgerError::InvalidAmount);
        }

        let _guard = self.locks.acquire(account_id).await?;

        for _ in 0..self.config.max_balance_retries {
            let mut account = self.load_active(account_id).await?;
            let expected = account.balance;
            account.debit(amount)?;

            let record = Transaction::withdrawal(account_id, amount, description.clone());
            match self
                .commit_single(account_id, expected, account.balance, record)
                .await?
            {
                Some(record) => {
                    tracing::debug!(
                        account_id = %account_id,
                        transaction_id = %record.id,
                        amount = %amount,
                        balance = %account.balance,
                        "withdrawal committed"
                    );
                    return Ok(record);
                }
                None => {
                    tracing::warn!(account_id = %account_id, "withdrawal hit balance conflict, retrying");
                }
            }
        }

        Err(LedgerError::ConcurrentUpdateConflict(account_id))
    }

    /// Transfers money between two accounts as one atomic unit: both
    /// balance changes and both ledger records commit, or neither does.
    ///
    /// Returns the initiating (`TransferOut`) leg.
    pub async fn transfer(
        &self,
        from_account_id: AccountId,
        to_account_id: AccountId,
        amount: Money,
        description: Option<String>,
    ) -> Result<Transaction, LedgerError> {
        if from_account_id == to_account_id {
            return Err(LedgerError::InvalidTransfer(
                "cannot transfer to the same account".into(),
            ));
        }
        if !amount.is_positive() {
            return Err(LedgerError::InvalidAmount);
        }

        let _guards = self.locks.acquire_pair(from_account_id, to_account_id).await?;

        for _ in 0..self.config.max_balance_retries {
            // Validate everything against fresh reads before touching state.
            let mut source = self.load_active(from_account_id).await?;
            let mut destination = self.load_active(to_account_id).await?;

            if !source.balance.checked_gte(&amount)? {
                return Err(LedgerError::InsufficientFunds {
                    available: source.balance.amount(),
                    requested: amount.amount(),
                });
            }

            let expected_source = source.balance;
            let expected_destination = destination.balance;
            source.debit(amount)?;
            destination.credit(amount)?;

            let debit = BalanceUpdate {
                account_id: from_account_id,
                expected: expected_source,
                new: source.balance,
            };
            let credit = BalanceUpdate {
                account_id: to_account_id,
                expected: expected_destination,
                new: destination.balance,
            };

            match self
                .commit_transfer(debit, credit, amount, description.clone())
                .await?
            {
                Some(out_leg) => {
                    tracing::debug!(
                        from = %from_account_id,
                        to = %to_account_id,
                        out_leg = %out_leg.id,
                        amount = %amount,
                        "transfer committed"
                    );
                    return Ok(out_leg);
                }
                None => {
                    tracing::warn!(
                        from = %from_account_id,
                        to = %to_account_id,
                        "transfer hit balance conflict, retrying"
                    );
                }
            }
        }

        Err(LedgerError::ConcurrentUpdateConflict(from_account_id))
    }

    // ─────────────────────────────────────────────────────────────────────
    // History queries
    // ─────────────────────────────────────────────────────────────────────

    /// Lists an account's ledger records, ordered by timestamp ascending.
    pub async fn get_transactions_by_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<Transaction>, LedgerError> {
        // The account must exist; inactive accounts keep a readable history.
        let _ = self
            .accounts
            .load(account_id)
            .await?
            .ok_or(LedgerError::AccountNotFound(account_id))?;

        self.transactions
            .list_by_account(account_id)
            .await
            .map_err(Into::into)
    }

    /// Gets a ledger record by ID.
    pub async fn get_transaction(&self, id: TransactionId) -> Result<Transaction, LedgerError> {
        self.transactions
            .load(id)
            .await?
            .ok_or(LedgerError::TransactionNotFound(id))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────

    async fn load_active(&self, id: AccountId) -> Result<Account, LedgerError> {
        let account = self
            .accounts
            .load(id)
            .await?
            .ok_or(LedgerError::AccountNotFound(id))?;
        if !account.active {
            return Err(LedgerError::AccountInactive(id));
        }
        Ok(account)
    }

    /// Commits one balance change plus its ledger record in a detached
    /// task, so the commit runs to completion even if the calling future
    /// is dropped mid-operation. `Ok(None)` means the balance moved under
    /// us and the caller should retry.
    async fn commit_single(
        &self,
        account_id: AccountId,
        expected: Money,
        new: Money,
        record: Transaction,
    ) -> Result<Option<Transaction>, LedgerError> {
        let accounts = Arc::clone(&self.accounts);
        let transactions = Arc::clone(&self.transactions);

        let handle = tokio::spawn(async move {
            match accounts
                .compare_and_update_balance(account_id, expected, new)
                .await
            {
                Ok(()) => transactions.append(record).await.map(Some),
                Err(StoreError::BalanceConflict(_)) => Ok(None),
                Err(e) => Err(e),
            }
        });

        handle
            .await
            .map_err(|e| LedgerError::Storage(e.to_string()))?
            .map_err(Into::into)
    }

    /// Commits both balance changes and both transfer legs in a detached
    /// task. The paired compare-and-update applies both balances or
    /// neither; the legs follow in the same task.
    async fn commit_transfer(
        &self,
        debit: BalanceUpdate,
        credit: BalanceUpdate,
        amount: Money,
        description: Option<String>,
    ) -> Result<Option<Transaction>, LedgerError> {
        let accounts = Arc::clone(&self.accounts);
        let transactions = Arc::clone(&self.transactions);

        let handle = tokio::spawn(async move {
            match accounts.compare_and_update_balances(debit, credit).await {
                Ok(()) => {
                    let out_leg = Transaction::transfer_out(
                        debit.account_id,
                        credit.account_id,
                        amount,
                        description.clone(),
                    );
                    let out_leg = transactions.append(out_leg).await?;

                    let in_leg = Transaction::transfer_in(
                        credit.account_id,
                        debit.account_id,
                        amount,
                        description,
                    );
                    transactions.append(in_leg).await?;

                    Ok(Some(out_leg))
                }
                Err(StoreError::BalanceConflict(_)) => Ok(None),
                Err(e) => Err(e),
            }
        });

        handle
            .await
            .map_err(|e| LedgerError::Storage(e.to_string()))?
            .map_err(Into::into)
    }
}
