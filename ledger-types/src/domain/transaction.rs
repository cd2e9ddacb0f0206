//! Transaction domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::account::AccountId;
use super::money::Money;

/// Unique identifier for a Transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(Uuid);

impl TransactionId {
    /// Creates a new random TransactionId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind/direction of a ledger record.
///
/// A transfer between two accounts is recorded as two linked legs, one per
/// account, so that each account's history is self-sufficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    /// Money coming into an account from an external source
    Deposit,
    /// Money leaving an account to an external destination
    Withdrawal,
    /// The debit leg of a transfer, recorded on the source account
    TransferOut,
    /// The credit leg of a transfer, recorded on the destination account
    TransferIn,
}

impl TransactionKind {
    /// Returns true if this kind increases the account's balance.
    pub fn is_credit(&self) -> bool {
        matches!(self, TransactionKind::Deposit | TransactionKind::TransferIn)
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Deposit => write!(f, "DEPOSIT"),
            TransactionKind::Withdrawal => write!(f, "WITHDRAWAL"),
            TransactionKind::TransferOut => write!(f, "TRANSFER_OUT"),
            TransactionKind::TransferIn => write!(f, "TRANSFER_IN"),
        }
    }
}

/// A recorded ledger entry for a single account.
///
/// Transactions are immutable once created - they represent
/// a historical record of what happened.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,
    /// The account this entry belongs to
    pub account_id: AccountId,
    /// Kind of entry
    pub kind: TransactionKind,
    /// Amount moved; always positive, signed by `kind`
    pub amount: Money,
    /// When the entry was committed
    pub timestamp: DateTime<Utc>,
    /// Caller-supplied description
    pub description: Option<String>,
    /// The other account of a transfer; present iff `kind` is a transfer leg
    pub related_account_id: Option<AccountId>,
}

impl Transaction {
    /// Creates a new deposit entry.
    pub fn deposit(account_id: AccountId, amount: Money, description: Option<String>) -> Self {
        Self {
            id: TransactionId::new(),
            account_id,
            kind: TransactionKind::Deposit,
            amount,
            timestamp: Utc::now(),
            description,
            related_account_id: None,
        }
    }

    /// Creates a new withdrawal entry.
    pub fn withdrawal(account_id: AccountId, amount: Money, description: Option<String>) -> Self {
        Self {
            id: TransactionId::new(),
            account_id,
            kind: TransactionKind::Withdrawal,
            amount,
            timestamp: Utc::now(),
            description,
            related_account_id: None,
        }
    }

    /// Creates the debit leg of a transfer, recorded on the source account.
    pub fn transfer_out(
        source: AccountId,
        destination: AccountId,
        amount: Money,
        description: Option<String>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            account_id: source,
            kind: TransactionKind::TransferOut,
            amount,
            timestamp: Utc::now(),
            description,
            related_account_id: Some(destination),
        }
    }

    /// Creates the credit leg of a transfer, recorded on the destination account.
    pub fn transfer_in(
        destination: AccountId,
        source: AccountId,
        amount: Money,
        description: Option<String>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            account_id: destination,
            kind: TransactionKind::TransferIn,
            amount,
            timestamp: Utc::now(),
            description,
            related_account_id: Some(source),
        }
    }

    /// The amount in minor units, signed by direction: credits positive,
    /// debits negative. Summing signed amounts over an account's history
    /// replays its balance from the opening balance.
    pub fn signed_amount(&self) -> i64 {
        if self.kind.is_credit() {
            self.amount.amount()
        } else {
            -self.amount.amount()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Currency;

    #[test]
    fn test_deposit_creation() {
        let account = AccountId::new();
        let amount = Money::new(1000, Currency::USD).unwrap();
        let tx = Transaction::deposit(account, amount, Some("payday".into()));

        assert_eq!(tx.kind, TransactionKind::Deposit);
        assert_eq!(tx.account_id, account);
        assert!(tx.related_account_id.is_none());
        assert_eq!(tx.signed_amount(), 1000);
    }

    #[test]
    fn test_withdrawal_is_signed_negative() {
        let account = AccountId::new();
        let amount = Money::new(250, Currency::USD).unwrap();
        let tx = Transaction::withdrawal(account, amount, None);

        assert_eq!(tx.kind, TransactionKind::Withdrawal);
        assert_eq!(tx.signed_amount(), -250);
    }

    #[test]
    fn test_transfer_legs_reference_each_other() {
        let alice = AccountId::new();
        let bob = AccountId::new();
        let amount = Money::new(500, Currency::USD).unwrap();

        let out = Transaction::transfer_out(alice, bob, amount, Some("rent".into()));
        let inn = Transaction::transfer_in(bob, alice, amount, Some("rent".into()));

        assert_eq!(out.kind, TransactionKind::TransferOut);
        assert_eq!(out.account_id, alice);
        assert_eq!(out.related_account_id, Some(bob));

        assert_eq!(inn.kind, TransactionKind::TransferIn);
        assert_eq!(inn.account_id, bob);
        assert_eq!(inn.related_account_id, Some(alice));

        // Distinct identities, opposite signs, same magnitude.
        assert_ne!(out.id, inn.id);
        assert_eq!(out.signed_amount() + inn.signed_amount(), 0);
    }
}
