use crate::domain::jobs::ConcatJob;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("job queue is closed")]
pub struct QueueClosed;

#[async_trait]
pub trait JobQueuePort: Send + Sync {
    /// Enqueue a job
    async fn enqueue_job(&self, job: ConcatJob) -> Result<(), QueueClosed>;

    /// Wait for the next job. `None` once the queue is closed and drained.
    async fn dequeue_job(&self) -> Option<ConcatJob>;
}
