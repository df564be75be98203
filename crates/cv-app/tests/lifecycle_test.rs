//! Monitoring lifecycle and disposal of the capture orchestrator.

mod common;

use std::sync::atomic::Ordering;

use common::*;
use cv_app::CaptureError;

#[tokio::test]
async fn test_construction_subscribes_without_starting() {
    let deps = TestDeps::new();
    let orchestrator = deps.build();

    assert!(deps.monitor.is_subscribed());
    assert_eq!(deps.monitor.subscribe_calls.load(Ordering::SeqCst), 1);
    assert_eq!(deps.monitor.start_calls.load(Ordering::SeqCst), 0);
    assert!(!orchestrator.is_monitoring());
}

#[tokio::test]
async fn test_start_twice_reaches_monitor_once() {
    let deps = TestDeps::new();
    let orchestrator = deps.build();

    orchestrator.start_monitoring().await.unwrap();
    orchestrator.start_monitoring().await.unwrap();

    assert!(orchestrator.is_monitoring());
    assert_eq!(deps.monitor.start_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_stop_when_stopped_is_noop() {
    let deps = TestDeps::new();
    let orchestrator = deps.build();

    orchestrator.stop_monitoring().await.unwrap();

    assert_eq!(deps.monitor.stop_calls.load(Ordering::SeqCst), 0);
    assert!(!orchestrator.is_monitoring());
}

#[tokio::test]
async fn test_start_stop_start_cycle() {
    let deps = TestDeps::new();
    let orchestrator = deps.build();

    orchestrator.start_monitoring().await.unwrap();
    orchestrator.stop_monitoring().await.unwrap();
    assert!(!orchestrator.is_monitoring());
    orchestrator.start_monitoring().await.unwrap();

    assert!(orchestrator.is_monitoring());
    assert_eq!(deps.monitor.start_calls.load(Ordering::SeqCst), 2);
    assert_eq!(deps.monitor.stop_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_start_failure_is_propagated() {
    let deps = TestDeps::new();
    deps.monitor.fail_start.store(true, Ordering::SeqCst);
    let orchestrator = deps.build();

    let result = orchestrator.start_monitoring().await;

    assert!(matches!(result, Err(CaptureError::Monitor(_))));
    assert!(!orchestrator.is_monitoring());

    deps.monitor.fail_start.store(false, Ordering::SeqCst);
    orchestrator.start_monitoring().await.unwrap();
    assert!(orchestrator.is_monitoring());
}

#[tokio::test]
async fn test_stop_failure_is_propagated_and_status_kept() {
    let deps = TestDeps::new();
    let orchestrator = deps.build();
    orchestrator.start_monitoring().await.unwrap();
    deps.monitor.fail_stop.store(true, Ordering::SeqCst);

    let result = orchestrator.stop_monitoring().await;

    assert!(matches!(result, Err(CaptureError::Monitor(_))));
    assert!(orchestrator.is_monitoring());
}

#[tokio::test]
async fn test_dispose_twice_releases_once() {
    let deps = TestDeps::new();
    let orchestrator = deps.build();
    orchestrator.start_monitoring().await.unwrap();

    orchestrator.dispose();
    orchestrator.dispose();

    assert_eq!(deps.monitor.unsubscribe_calls.load(Ordering::SeqCst), 1);
    assert_eq!(deps.monitor.release_calls.load(Ordering::SeqCst), 1);
    assert!(!deps.monitor.is_subscribed());
    assert!(!orchestrator.is_monitoring());
    assert!(orchestrator.is_disposed());

    drop(orchestrator);
    assert_eq!(deps.monitor.release_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_drop_disposes() {
    let deps = TestDeps::new();
    let orchestrator = deps.build();

    drop(orchestrator);

    assert_eq!(deps.monitor.unsubscribe_calls.load(Ordering::SeqCst), 1);
    assert_eq!(deps.monitor.release_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_operations_after_dispose_fail() {
    let deps = TestDeps::new();
    let orchestrator = deps.build();
    orchestrator.dispose();

    assert!(matches!(
        orchestrator.start_monitoring().await,
        Err(CaptureError::Disposed)
    ));
    assert!(matches!(
        orchestrator.stop_monitoring().await,
        Err(CaptureError::Disposed)
    ));
    assert_eq!(deps.monitor.start_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_events_after_dispose_are_not_delivered() {
    let deps = TestDeps::new();
    let orchestrator = deps.build();
    orchestrator.dispose();

    let delivered = deps.monitor.emit(text_event("late", 1)).await;

    assert!(!delivered);
    assert!(deps.store.is_empty().await);
}
