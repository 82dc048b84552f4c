//! Sync Job Polling Integration Tests
//!
//! Covers single-job waits (done, failed with and without server error
//! text, attempt cap), cancellation, multi-job waits with deduplication,
//! and the detached watcher callback contract.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use replydesk::services::jobs::{self, SINGLE_JOB_MAX_ATTEMPTS};
use replydesk::{AppError, BackendApi, JobStatus, SyncJobPoller};

use crate::support::ScriptedBackend;

// ============ Helpers ============

const FAST: Duration = Duration::from_millis(2);

fn scripted_poller() -> (Arc<ScriptedBackend>, SyncJobPoller) {
    let backend = Arc::new(ScriptedBackend::new());
    let api: Arc<dyn BackendApi> = backend.clone();
    (backend, SyncJobPoller::new(api))
}

// ============ Single Job Tests ============

#[tokio::test]
async fn test_wait_resolves_after_pending_polls() {
    let (backend, poller) = scripted_poller();
    backend.script_job(42, 3, JobStatus::Done);

    let job = poller.wait(42, FAST).await.unwrap();

    assert_eq!(job.status, JobStatus::Done);
    assert_eq!(backend.call_count("job_status"), 4);
}

#[tokio::test]
async fn test_wait_surfaces_server_error_text() {
    let (backend, poller) = scripted_poller();
    backend.script_job_with_error(42, 1, JobStatus::Failed, Some("review import crashed"));

    match poller.wait(42, FAST).await {
        Err(AppError::Api(message)) => assert_eq!(message, "review import crashed"),
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[tokio::test]
async fn test_wait_falls_back_to_generic_failure_message() {
    let (backend, poller) = scripted_poller();
    backend.script_job_with_error(42, 0, JobStatus::Failed, Some("   "));

    match poller.wait(42, FAST).await {
        Err(AppError::Api(message)) => assert_eq!(message, "job 42 failed"),
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[tokio::test]
async fn test_wait_gives_up_after_attempt_cap() {
    // Unscripted jobs never leave pending.
    let (backend, poller) = scripted_poller();

    let result = poller.wait(7, Duration::from_millis(1)).await;

    assert!(matches!(result, Err(AppError::Api(_))));
    assert_eq!(
        backend.call_count("job_status"),
        SINGLE_JOB_MAX_ATTEMPTS as usize
    );
}

#[tokio::test]
async fn test_cancellation_stops_the_wait() {
    let backend = Arc::new(ScriptedBackend::new());
    let api: Arc<dyn BackendApi> = backend.clone();
    let token = CancellationToken::new();
    let poller = SyncJobPoller::with_token(api, token.clone());

    let waiter = tokio::spawn(async move { poller.wait(7, Duration::from_millis(5)).await });
    tokio::time::sleep(Duration::from_millis(12)).await;
    token.cancel();

    let result = waiter.await.unwrap();
    assert!(matches!(result, Err(AppError::Internal(_))));
}

#[tokio::test]
async fn test_submit_and_wait_round_trip() {
    let (backend, poller) = scripted_poller();
    // The first submitted job gets id 500.
    backend.script_job(500, 2, JobStatus::Done);

    let job = poller.submit_and_wait(9, FAST).await.unwrap();

    assert_eq!(job.id, 500);
    assert_eq!(job.status, JobStatus::Done);
    assert_eq!(backend.call_count("submit_sync"), 1);
}

// ============ Multi Job Tests ============

#[tokio::test]
async fn test_wait_all_resolves_when_every_job_finishes() {
    let (backend, poller) = scripted_poller();
    backend.script_job(700, 0, JobStatus::Done);
    backend.script_job(701, 3, JobStatus::Done);

    // Duplicate ids are polled once per round.
    poller.wait_all(&[700, 701, 700], FAST).await.unwrap();
}

#[tokio::test]
async fn test_wait_all_aborts_on_first_failure() {
    let (backend, poller) = scripted_poller();
    backend.script_job(700, 0, JobStatus::Done);
    backend.script_job_with_error(701, 1, JobStatus::Failed, Some("sync worker died"));

    match poller.wait_all(&[700, 701], FAST).await {
        Err(AppError::Api(message)) => assert_eq!(message, "sync worker died"),
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[tokio::test]
async fn test_wait_all_with_no_jobs_is_immediate() {
    let (backend, poller) = scripted_poller();

    poller.wait_all(&[], FAST).await.unwrap();

    assert_eq!(backend.call_count("job_status"), 0);
}

// ============ Watcher Tests ============

#[tokio::test]
async fn test_watch_invokes_callback_with_terminal_job() {
    let backend = Arc::new(ScriptedBackend::new());
    backend.script_job(600, 2, JobStatus::Done);
    let api: Arc<dyn BackendApi> = backend.clone();

    let (tx, rx) = tokio::sync::oneshot::channel();
    let handle = jobs::watch(api, 600, FAST, move |result| {
        let _ = tx.send(result.map(|job| job.status));
    });

    let outcome = rx.await.unwrap();
    assert_eq!(outcome.unwrap(), JobStatus::Done);

    handle.join().await;
}

#[tokio::test]
async fn test_cancelled_watch_skips_the_callback() {
    let backend = Arc::new(ScriptedBackend::new());
    let api: Arc<dyn BackendApi> = backend.clone();

    let (tx, rx) = tokio::sync::oneshot::channel();
    let handle = jobs::watch(api, 601, Duration::from_millis(5), move |result| {
        let _ = tx.send(result.map(|job| job.status));
    });
    tokio::time::sleep(Duration::from_millis(12)).await;
    handle.cancel();
    handle.join().await;

    // The sender was dropped without firing.
    assert!(rx.await.is_err());
}
