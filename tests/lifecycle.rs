//! Worker Lifecycle Tests
//!
//! Covers the host event loop: pending display/open operations settle before
//! teardown, and rejected events do not stop the worker.

mod common;

use common::{slow_worker, worker};
use push_worker::domain::event::{NotificationClickEvent, PushEvent};
use serde_json::json;

#[tokio::test]
async fn early_teardown_waits_for_pending_display() {
    let test = slow_worker(50);
    let handle = test.spawn();

    handle
        .dispatch(PushEvent::with_json(&json!({ "title": "Late", "url": "/late" })))
        .await
        .unwrap();
    handle.shutdown().await.unwrap();

    let active = test.only_active();
    assert_eq!(active.title, "Late");
    assert_eq!(active.target_url(), Some("/late"));
}

#[tokio::test]
async fn early_teardown_waits_for_pending_window_open() {
    let test = slow_worker(50);
    let shown = test.push_json(json!({ "url": "/sale" })).await;
    let handle = test.spawn();

    handle
        .dispatch(NotificationClickEvent {
            notification: shown.clone(),
        })
        .await
        .unwrap();
    handle.shutdown().await.unwrap();

    assert_eq!(test.platform.opened_windows(), vec!["/sale".to_string()]);
    assert_eq!(test.platform.close_count(shown.id), 1);
}

#[tokio::test]
async fn queued_events_settle_in_order_before_teardown() {
    let test = slow_worker(10);
    let handle = test.spawn();

    for title in ["one", "two", "three"] {
        handle
            .dispatch(PushEvent::with_json(&json!({ "title": title })))
            .await
            .unwrap();
    }
    handle.shutdown().await.unwrap();

    let titles: Vec<String> = test
        .platform
        .active()
        .into_iter()
        .map(|notification| notification.title)
        .collect();
    assert_eq!(titles, vec!["one", "two", "three"]);
}

#[tokio::test]
async fn rejected_event_is_reported_and_worker_keeps_running() {
    let test = worker();
    let handle = test.spawn();

    let rejected = handle
        .dispatch_and_wait(PushEvent::with_data("{broken"))
        .await;
    assert!(rejected.is_err());

    handle.dispatch_and_wait(PushEvent::empty()).await.unwrap();
    handle.shutdown().await.unwrap();

    assert_eq!(test.only_active().title, "Default Title");
}

#[tokio::test]
async fn dispatch_and_wait_reports_click_outcome() {
    let test = worker();
    let shown = test.push_json(json!({ "url": "/blocked" })).await;
    test.platform.block_windows(true);
    let handle = test.spawn();

    let result = handle
        .dispatch_and_wait(NotificationClickEvent { notification: shown })
        .await;
    handle.shutdown().await.unwrap();

    assert!(result.is_err());
    assert!(test.platform.active().is_empty());
}
