//! Sync Job Polling
//!
//! Submits marketplace sync jobs and polls their status until terminal.
//! Remote statuses are decoded leniently (anything unrecognized keeps the
//! job pending) so polling only ends on a recognizable `done`/`failed` or
//! when the attempt cap runs out. Every wait races a cancellation token so
//! a torn-down owner stops the loop on the next tick.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::api::BackendApi;
use crate::models::job::{Job, JobStatus};
use crate::utils::error::{AppError, AppResult};

/// Delay between status checks
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
/// Checks before a single-job wait gives up
pub const SINGLE_JOB_MAX_ATTEMPTS: u32 = 120;
/// Checks before a multi-job wait gives up
pub const MULTI_JOB_MAX_ATTEMPTS: u32 = 240;

pub struct SyncJobPoller {
    api: Arc<dyn BackendApi>,
    cancellation_token: CancellationToken,
}

impl SyncJobPoller {
    pub fn new(api: Arc<dyn BackendApi>) -> Self {
        Self::with_token(api, CancellationToken::new())
    }

    /// Bind the poller to an externally owned token.
    pub fn with_token(api: Arc<dyn BackendApi>, cancellation_token: CancellationToken) -> Self {
        Self {
            api,
            cancellation_token,
        }
    }

    pub fn cancel(&self) {
        self.cancellation_token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation_token.is_cancelled()
    }

    /// Queue a sync for the shop and return the job id.
    pub async fn submit(&self, shop_id: i64) -> AppResult<i64> {
        let job_id = self.api.submit_sync(shop_id).await?;
        tracing::info!("[SyncJobPoller] Sync queued for shop {} as job {}", shop_id, job_id);
        Ok(job_id)
    }

    /// Poll one job until it settles. `failed` surfaces the job's own
    /// error text when the server recorded one.
    pub async fn wait(&self, job_id: i64, interval: Duration) -> AppResult<Job> {
        let mut ticker = tokio::time::interval(interval);
        // The first tick fires immediately; skip it so checks are spaced
        // a full interval after submission.
        ticker.tick().await;

        for _ in 0..SINGLE_JOB_MAX_ATTEMPTS {
            tokio::select! {
                _ = self.cancellation_token.cancelled() => {
                    return Err(AppError::internal("sync polling cancelled"));
                }
                _ = ticker.tick() => {}
            }

            let job = self.api.job_status(job_id).await?;
            match job.status {
                JobStatus::Done => return Ok(job),
                JobStatus::Failed => return Err(failed_job_error(&job)),
                JobStatus::Pending => {}
            }
        }

        Err(AppError::api(format!(
            "job {} did not finish after {} checks",
            job_id, SINGLE_JOB_MAX_ATTEMPTS
        )))
    }

    /// Submit and wait in one step.
    pub async fn submit_and_wait(&self, shop_id: i64, interval: Duration) -> AppResult<Job> {
        let job_id = self.submit(shop_id).await?;
        self.wait(job_id, interval).await
    }

    /// Poll a set of jobs together. Ids are deduplicated; the first
    /// `failed` aborts the wait, and success requires every job `done`.
    pub async fn wait_all(&self, job_ids: &[i64], interval: Duration) -> AppResult<()> {
        let mut pending: Vec<i64> = Vec::new();
        for id in job_ids {
            if !pending.contains(id) {
                pending.push(*id);
            }
        }
        if pending.is_empty() {
            return Ok(());
        }

        let mut ticker = tokio::time::interval(interval);
        ticker.tick().await;

        for _ in 0..MULTI_JOB_MAX_ATTEMPTS {
            tokio::select! {
                _ = self.cancellation_token.cancelled() => {
                    return Err(AppError::internal("sync polling cancelled"));
                }
                _ = ticker.tick() => {}
            }

            let mut still_pending = Vec::with_capacity(pending.len());
            for id in &pending {
                let job = self.api.job_status(*id).await?;
                match job.status {
                    JobStatus::Done => {}
                    JobStatus::Failed => return Err(failed_job_error(&job)),
                    JobStatus::Pending => still_pending.push(*id),
                }
            }
            pending = still_pending;
            if pending.is_empty() {
                return Ok(());
            }
        }

        Err(AppError::api(format!(
            "{} sync job(s) still running after {} checks",
            pending.len(),
            MULTI_JOB_MAX_ATTEMPTS
        )))
    }
}

fn failed_job_error(job: &Job) -> AppError {
    match &job.last_error {
        Some(message) if !message.trim().is_empty() => AppError::api(message.clone()),
        _ => AppError::api(format!("job {} failed", job.id)),
    }
}

// ============================================================================
// Detached watching
// ============================================================================

/// Handle to a background wait. Dropping it detaches the watcher; call
/// [`PollHandle::cancel`] to stop polling early.
pub struct PollHandle {
    cancellation_token: CancellationToken,
    handle: JoinHandle<()>,
}

impl PollHandle {
    pub fn cancel(&self) {
        self.cancellation_token.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the watcher task itself to exit.
    pub async fn join(self) {
        let _ = self.handle.await;
    }
}

/// Spawn a background wait for one job, invoking `on_terminal` with the
/// outcome. A cancelled watcher exits without invoking the callback.
pub fn watch<F>(
    api: Arc<dyn BackendApi>,
    job_id: i64,
    interval: Duration,
    on_terminal: F,
) -> PollHandle
where
    F: FnOnce(AppResult<Job>) + Send + 'static,
{
    let cancellation_token = CancellationToken::new();
    let poller = SyncJobPoller::with_token(api, cancellation_token.clone());

    let handle = tokio::spawn(async move {
        let result = poller.wait(job_id, interval).await;
        if poller.is_cancelled() {
            return;
        }
        if let Err(e) = &result {
            tracing::warn!("[SyncJobPoller] Job {} ended with error: {}", job_id, e);
        }
        on_terminal(result);
    });

    PollHandle {
        cancellation_token,
        handle,
    }
}
