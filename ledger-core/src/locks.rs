//! Per-account write serialization, shared by both services.
//!
//! Every operation that changes an account - balance moves and lifecycle
//! changes alike - must hold that account's lock while it validates and
//! commits. Transfers take both locks in ascending `AccountId` order, so
//! two transfers moving money in opposite directions between the same pair
//! of accounts can never wait on each other in a cycle.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tokio::time::timeout;

use ledger_types::{AccountId, LedgerError};

use crate::config::ServiceConfig;

/// Registry of per-account write locks.
///
/// Entries are created on first use and live for the registry's lifetime;
/// accounts are never deleted.
pub struct AccountLocks {
    locks: DashMap<AccountId, Arc<Mutex<()>>>,
    wait: Duration,
}

impl Default for AccountLocks {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

impl AccountLocks {
    /// Creates a registry whose acquisitions wait at most `wait`.
    pub fn new(wait: Duration) -> Self {
        Self {
            locks: DashMap::new(),
            wait,
        }
    }

    /// Creates a registry using the configured lock wait.
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(config.lock_wait)
    }

    fn handle(&self, id: AccountId) -> Arc<Mutex<()>> {
        self.locks
            .entry(id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Acquires the write lock for one account, bounded by the configured
    /// wait; fails with `OperationTimeout` on expiry.
    pub async fn acquire(&self, id: AccountId) -> Result<OwnedMutexGuard<()>, LedgerError> {
        let handle = self.handle(id);
        timeout(self.wait, handle.lock_owned())
            .await
            .map_err(|_| LedgerError::OperationTimeout(id))
    }

    /// Acquires two account locks in ascending id order, independent of
    /// argument order.
    pub async fn acquire_pair(
        &self,
        x: AccountId,
        y: AccountId,
    ) -> Result<(OwnedMutexGuard<()>, OwnedMutexGuard<()>), LedgerError> {
        let (first, second) = if x < y { (x, y) } else { (y, x) };
        let first_guard = self.acquire(first).await?;
        let second_guard = self.acquire(second).await?;
        Ok((first_guard, second_guard))
    }
}
