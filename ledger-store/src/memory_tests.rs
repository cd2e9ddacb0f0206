//! In-memory adapter tests.

use ledger_types::{
    Account, AccountId, AccountStore, AccountType, BalanceUpdate, Currency, CustomerId, Money,
    StoreError, Transaction, TransactionId, TransactionStore,
};

use crate::{MemoryAccountStore, MemoryTransactionStore};

fn customer(id: &str) -> CustomerId {
    CustomerId::new(id).unwrap()
}

fn usd(amount: i64) -> Money {
    Money::new(amount, Currency::USD).unwrap()
}

fn account(customer_id: &str, balance: i64) -> Account {
    Account::new(customer(customer_id), AccountType::Checking, usd(balance))
}

#[tokio::test]
async fn test_create_and_load_account() {
    let store = MemoryAccountStore::new();
    let created = store.create(account("CUST-001", 1000)).await.unwrap();

    let loaded = store.load(created.id).await.unwrap().unwrap();
    assert_eq!(loaded.id, created.id);
    assert_eq!(loaded.balance, usd(1000));
    assert!(loaded.active);
}

#[tokio::test]
async fn test_load_missing_account_returns_none() {
    let store = MemoryAccountStore::new();
    assert!(store.load(AccountId::new()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_create_duplicate_id_fails() {
    let store = MemoryAccountStore::new();
    let created = store.create(account("CUST-001", 0)).await.unwrap();

    let result = store.create(created).await;
    assert!(matches!(result, Err(StoreError::DuplicateId(_))));
}

#[tokio::test]
async fn test_compare_and_update_balance_success() {
    let store = MemoryAccountStore::new();
    let created = store.create(account("CUST-001", 1000)).await.unwrap();

    store
        .compare_and_update_balance(created.id, usd(1000), usd(1500))
        .await
        .unwrap();

    let loaded = store.load(created.id).await.unwrap().unwrap();
    assert_eq!(loaded.balance, usd(1500));
}

#[tokio::test]
async fn test_compare_and_update_balance_conflict_on_stale_expected() {
    let store = MemoryAccountStore::new();
    let created = store.create(account("CUST-001", 1000)).await.unwrap();

    // Another writer already moved the balance.
    store
        .compare_and_update_balance(created.id, usd(1000), usd(900))
        .await
        .unwrap();

    let result = store
        .compare_and_update_balance(created.id, usd(1000), usd(1500))
        .await;
    assert!(matches!(result, Err(StoreError::BalanceConflict(_))));

    // The stale writer changed nothing.
    let loaded = store.load(created.id).await.unwrap().unwrap();
    assert_eq!(loaded.balance, usd(900));
}

#[tokio::test]
async fn test_compare_and_update_balance_missing_account() {
    let store = MemoryAccountStore::new();
    let result = store
        .compare_and_update_balance(AccountId::new(), usd(0), usd(100))
        .await;
    assert!(matches!(result, Err(StoreError::AccountNotFound(_))));
}

#[tokio::test]
async fn test_paired_update_commits_both_balances() {
    let store = MemoryAccountStore::new();
    let source = store.create(account("CUST-001", 1000)).await.unwrap();
    let destination = store.create(account("CUST-002", 0)).await.unwrap();

    store
        .compare_and_update_balances(
            BalanceUpdate {
                account_id: source.id,
                expected: usd(1000),
                new: usd(700),
            },
            BalanceUpdate {
                account_id: destination.id,
                expected: usd(0),
                new: usd(300),
            },
        )
        .await
        .unwrap();

    assert_eq!(store.load(source.id).await.unwrap().unwrap().balance, usd(700));
    assert_eq!(
        store.load(destination.id).await.unwrap().unwrap().balance,
        usd(300)
    );
}

#[tokio::test]
async fn test_paired_update_conflict_changes_neither_balance() {
    let store = MemoryAccountStore::new();
    let source = store.create(account("CUST-001", 1000)).await.unwrap();
    let destination = store.create(account("CUST-002", 500)).await.unwrap();

    // The credit side's expectation is stale.
    let result = store
        .compare_and_update_balances(
            BalanceUpdate {
                account_id: source.id,
                expected: usd(1000),
                new: usd(700),
            },
            BalanceUpdate {
                account_id: destination.id,
                expected: usd(400),
                new: usd(700),
            },
        )
        .await;
    assert!(matches!(result, Err(StoreError::BalanceConflict(id)) if id == destination.id));

    // Both-or-neither: the debit side must not have been applied.
    assert_eq!(
        store.load(source.id).await.unwrap().unwrap().balance,
        usd(1000)
    );
    assert_eq!(
        store.load(destination.id).await.unwrap().unwrap().balance,
        usd(500)
    );
}

#[tokio::test]
async fn test_paired_update_missing_account_changes_neither_balance() {
    let store = MemoryAccountStore::new();
    let source = store.create(account("CUST-001", 1000)).await.unwrap();

    let result = store
        .compare_and_update_balances(
            BalanceUpdate {
                account_id: source.id,
                expected: usd(1000),
                new: usd(700),
            },
            BalanceUpdate {
                account_id: AccountId::new(),
                expected: usd(0),
                new: usd(300),
            },
        )
        .await;
    assert!(matches!(result, Err(StoreError::AccountNotFound(_))));

    assert_eq!(
        store.load(source.id).await.unwrap().unwrap().balance,
        usd(1000)
    );
}

#[tokio::test]
async fn test_deactivate_account() {
    let store = MemoryAccountStore::new();
    let created = store.create(account("CUST-001", 500)).await.unwrap();

    let updated = store.deactivate(created.id).await.unwrap();
    assert!(!updated.active);
    assert_eq!(updated.balance, usd(500));

    let loaded = store.load(created.id).await.unwrap().unwrap();
    assert!(!loaded.active);
}

#[tokio::test]
async fn test_list_by_customer_in_creation_order() {
    let store = MemoryAccountStore::new();
    let first = store.create(account("CUST-001", 100)).await.unwrap();
    let _other = store.create(account("CUST-002", 200)).await.unwrap();
    let second = store.create(account("CUST-001", 300)).await.unwrap();

    let listed = store.list_by_customer(&customer("CUST-001")).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, first.id);
    assert_eq!(listed[1].id, second.id);
}

#[tokio::test]
async fn test_list_by_unknown_customer_is_empty() {
    let store = MemoryAccountStore::new();
    store.create(account("CUST-001", 100)).await.unwrap();

    let listed = store.list_by_customer(&customer("CUST-999")).await.unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn test_list_all_in_creation_order() {
    let store = MemoryAccountStore::new();
    let a = store.create(account("CUST-001", 100)).await.unwrap();
    let b = store.create(account("CUST-002", 200)).await.unwrap();

    let listed = store.list_all().await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, a.id);
    assert_eq!(listed[1].id, b.id);
}

#[tokio::test]
async fn test_append_and_load_transaction() {
    let store = MemoryTransactionStore::new();
    let account_id = AccountId::new();
    let tx = Transaction::deposit(account_id, usd(1000), Some("payday".into()));

    let appended = store.append(tx.clone()).await.unwrap();
    assert_eq!(appended.id, tx.id);

    let loaded = store.load(tx.id).await.unwrap().unwrap();
    assert_eq!(loaded.account_id, account_id);
    assert_eq!(loaded.amount, usd(1000));
}

#[tokio::test]
async fn test_load_missing_transaction_returns_none() {
    let store = MemoryTransactionStore::new();
    assert!(store.load(TransactionId::new()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_append_duplicate_id_fails() {
    let store = MemoryTransactionStore::new();
    let tx = Transaction::deposit(AccountId::new(), usd(100), None);

    store.append(tx.clone()).await.unwrap();
    let result = store.append(tx).await;
    assert!(matches!(result, Err(StoreError::DuplicateId(_))));
}

#[tokio::test]
async fn test_list_by_account_timestamp_ascending() {
    let store = MemoryTransactionStore::new();
    let account_id = AccountId::new();

    let first = store
        .append(Transaction::deposit(account_id, usd(100), None))
        .await
        .unwrap();
    let second = store
        .append(Transaction::withdrawal(account_id, usd(40), None))
        .await
        .unwrap();
    // A record for another account must not show up.
    store
        .append(Transaction::deposit(AccountId::new(), usd(999), None))
        .await
        .unwrap();

    let listed = store.list_by_account(account_id).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, first.id);
    assert_eq!(listed[1].id, second.id);
    assert!(listed[0].timestamp <= listed[1].timestamp);
}

#[tokio::test]
async fn test_list_by_account_empty_when_no_history() {
    let store = MemoryTransactionStore::new();
    let listed = store.list_by_account(AccountId::new()).await.unwrap();
    assert!(listed.is_empty());
}
