use chrono::Utc;
use point_wallet::domain::history::TransactionKind;
use point_wallet::domain::point::Amount;
use point_wallet::domain::ports::{BalanceStoreBox, HistoryLogBox};
use point_wallet::infrastructure::in_memory::{InMemoryBalanceStore, InMemoryHistoryLog};

#[tokio::test]
async fn test_stores_as_trait_objects() {
    let balance_store: BalanceStoreBox = Box::new(InMemoryBalanceStore::new());
    let history_log: HistoryLogBox = Box::new(InMemoryHistoryLog::new());

    // Verify Send + Sync by spawning tasks
    let balance_handle = tokio::spawn(async move {
        balance_store.write(1, 100).await.unwrap();
        balance_store.read(1).await.unwrap()
    });

    let history_handle = tokio::spawn(async move {
        history_log
            .append(1, Amount::new(100).unwrap(), TransactionKind::Charge, Utc::now())
            .await
            .unwrap();
        history_log.list_by_user(1).await.unwrap()
    });

    let balance = balance_handle.await.unwrap();
    assert_eq!(balance.user_id, 1);
    assert_eq!(balance.point, 100);

    let history = history_handle.await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, 1);
}
