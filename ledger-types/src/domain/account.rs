//! Account domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::money::{Currency, Money};
use crate::error::DomainError;

/// Unique identifier for an Account.
///
/// Ordered so callers can acquire per-account resources in a canonical
/// sequence independent of argument order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Creates a new random AccountId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque customer identity, assigned by an external identity system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(String);

impl CustomerId {
    /// Creates a CustomerId. The identifier must not be blank.
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::Validation(
                "Customer id cannot be empty".into(),
            ));
        }
        Ok(Self(id))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The product type of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    Checking,
    Savings,
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountType::Checking => write!(f, "CHECKING"),
            AccountType::Savings => write!(f, "SAVINGS"),
        }
    }
}

/// A financial account that can hold a balance.
///
/// The balance never goes negative; `debit` enforces this through
/// `Money::checked_sub`. A deactivated account keeps its balance and
/// history but accepts no further mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier, immutable after creation
    pub id: AccountId,
    /// Owning customer
    pub customer_id: CustomerId,
    /// Product type
    pub account_type: AccountType,
    /// Current balance (includes currency information)
    pub balance: Money,
    /// False once the account is closed; terminal
    pub active: bool,
    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new active account with the given opening balance.
    pub fn new(
        customer_id: CustomerId,
        account_type: AccountType,
        initial_balance: Money,
    ) -> Self {
        Self {
            id: AccountId::new(),
            customer_id,
            account_type,
            balance: initial_balance,
            active: true,
            created_at: Utc::now(),
        }
    }

    /// Returns the currency of this account.
    pub fn currency(&self) -> Currency {
        self.balance.currency()
    }

    /// Credits (adds) money to the account.
    pub fn credit(&mut self, amount: Money) -> Result<(), DomainError> {
        self.balance = self.balance.checked_add(amount)?;
        Ok(())
    }

    /// Debits (subtracts) money from the account.
    pub fn debit(&mut self, amount: Money) -> Result<(), DomainError> {
        self.balance = self.balance.checked_sub(amount)?;
        Ok(())
    }

    /// Marks the account inactive. Deactivation is terminal.
    pub fn deactivate(&mut self) {
        self.active = false;
    }
}
