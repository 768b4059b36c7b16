use std::time::Duration;
use carousel_watch::kernel::bridge;

#[tokio::test]
async fn test_fifo_order_without_loss() {
    let (tx, mut rx) = bridge::channel(Duration::from_millis(5));
    for index in [3, 1, 4, 1, 5] {
        tx.push(index);
    }
    assert_eq!(rx.len(), 5);

    let mut drained = Vec::new();
    for _ in 0..5 {
        drained.push(rx.recv().await);
    }
    assert_eq!(drained, vec![3, 1, 4, 1, 5]);
    assert!(rx.is_empty());
    assert_eq!(rx.pop_front(), None);
}

#[tokio::test(start_paused = true)]
async fn test_wait_blocks_while_empty() {
    let (_tx, rx) = bridge::channel(Duration::from_millis(16));
    let waited = tokio::time::timeout(Duration::from_secs(10), rx.wait_non_empty()).await;
    assert!(waited.is_err(), "empty queue must keep the consumer waiting");
}

#[tokio::test(start_paused = true)]
async fn test_push_from_other_task_wakes_consumer() {
    let (tx, mut rx) = bridge::channel(Duration::from_millis(16));

    let producer = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        tx.push(2);
        tokio::time::sleep(Duration::from_millis(100)).await;
        tx.push(0);
    });

    assert_eq!(rx.recv().await, 2);
    assert_eq!(rx.recv().await, 0);
    producer.await.unwrap();
}

#[tokio::test]
async fn test_queued_events_outlive_producer() {
    let (tx, mut rx) = bridge::channel(Duration::from_millis(5));
    tx.push(7);
    drop(tx);
    assert_eq!(rx.recv().await, 7);
}
