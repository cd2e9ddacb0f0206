//! Service configuration loading from environment.

use std::env;
use std::time::Duration;

/// Tuning knobs for the transaction service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// How many times a balance compare-and-update is retried on conflict
    /// before the operation fails with `ConcurrentUpdateConflict`.
    pub max_balance_retries: u32,
    /// How long an operation may wait for a per-account lock before it
    /// fails with `OperationTimeout`.
    pub lock_wait: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_balance_retries: 5,
            lock_wait: Duration::from_secs(5),
        }
    }
}

impl ServiceConfig {
    /// Loads configuration from environment variables, falling back to
    /// defaults when unset.
    pub fn from_env() -> anyhow::Result<Self> {
        let max_balance_retries = env::var("LEDGER_MAX_RETRIES")
            .unwrap_or_else(|_| "5".to_string())
            .parse()?;

        let lock_wait_ms: u64 = env::var("LEDGER_LOCK_WAIT_MS")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()?;

        Ok(Self {
            max_balance_retries,
            lock_wait: Duration::from_millis(lock_wait_ms),
        })
    }
}
