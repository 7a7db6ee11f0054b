//! Spin watcher against the mock service

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::Harness;
use reward_client::{MIN_POLL_INTERVAL, SpinEvent};
use reward_mock::Config;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn test_first_poll_is_baseline() {
    let h = Harness::start().await;
    let id = h.create_reward("Festive Spin", 2).await;
    h.client.rewards.trigger_spin(&id).await.unwrap();

    let watcher = h.client.watcher(Duration::from_millis(10));
    assert!(watcher.poll_once().await.unwrap().is_empty());
    assert!(watcher.poll_once().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_poll_reports_started_then_completed() {
    let h = Harness::start().await;
    let id = h.create_reward("Festive Spin", 3).await;
    let watcher = h.client.watcher(Duration::from_millis(10));
    let mut events = watcher.subscribe();
    watcher.poll_once().await.unwrap();

    h.client.rewards.trigger_spin(&id).await.unwrap();
    let polled = watcher.poll_once().await.unwrap();
    assert!(matches!(polled.as_slice(), [SpinEvent::Started { audience, .. }] if audience.len() == 3));

    let winner = h.state().resolve_spin(&id).unwrap();
    let polled = watcher.poll_once().await.unwrap();
    assert!(matches!(polled.as_slice(), [SpinEvent::Completed { winner: w, .. }] if *w == winner));

    assert!(matches!(events.recv().await.unwrap(), SpinEvent::Started { .. }));
    assert!(matches!(events.recv().await.unwrap(), SpinEvent::Completed { .. }));

    h.client.rewards.reset_spin(&id).await.unwrap();
    assert_eq!(
        watcher.poll_once().await.unwrap(),
        vec![SpinEvent::Reset { reward_id: id }]
    );
}

#[tokio::test]
async fn test_run_publishes_until_cancelled() {
    let config = Config::ephemeral().with_spin_delay(Duration::from_millis(200));
    let h = Harness::with_config(config).await;
    let id = h.create_reward("Festive Spin", 2).await;

    let watcher = Arc::new(h.client.watcher(Duration::from_millis(10)));
    let mut events = watcher.subscribe();
    let cancel = CancellationToken::new();
    let task = {
        let watcher = watcher.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move { watcher.run(cancel).await })
    };

    // Let the baseline poll land before triggering
    tokio::time::sleep(Duration::from_millis(50)).await;
    h.client.rewards.trigger_spin(&id).await.unwrap();

    let started = timeout(Duration::from_secs(2), events.recv())
        .await
        .expect("started event")
        .unwrap();
    assert!(matches!(started, SpinEvent::Started { ref reward_id, .. } if *reward_id == id));

    let completed = timeout(Duration::from_secs(2), events.recv())
        .await
        .expect("completed event")
        .unwrap();
    assert!(matches!(completed, SpinEvent::Completed { ref reward_id, .. } if *reward_id == id));

    cancel.cancel();
    timeout(Duration::from_secs(1), task)
        .await
        .expect("watcher stopped")
        .unwrap();
}

#[tokio::test]
async fn test_zero_interval_is_raised_to_minimum() {
    let h = Harness::start().await;
    let watcher = h.client.watcher(Duration::ZERO);
    assert_eq!(watcher.interval(), MIN_POLL_INTERVAL);

    let cancel = CancellationToken::new();
    let stop = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        stop.cancel();
    });
    timeout(Duration::from_secs(2), watcher.run(cancel))
        .await
        .expect("watcher stopped");
    assert!(h.state().count(reqwest::Method::GET, "/api/rewards") >= 1);
}
