use crate::adapters::local::fs::LocalStorage;
use crate::application::editor::now_nanos;
use crate::application::invoker::MediaJobInvoker;
use crate::domain::jobs::{ConcatJob, JobState};
use crate::domain::naming::{concat_file_name, manifest_file_name};
use crate::domain::video::ConcatOperation;
use crate::error::EditResult;
use crate::ports::queue::JobQueuePort;
use crate::ports::repository::{JobStatusRepository, LedgerEntry, TaskLedger, VideoRepository};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Consumes background concat jobs. Outcomes reach the client only through
/// the ledger, the video records and the job status registry.
pub struct WorkerService {
    storage: LocalStorage,
    invoker: MediaJobInvoker,
    queue: Arc<dyn JobQueuePort>,
    videos: Arc<dyn VideoRepository>,
    ledger: Arc<dyn TaskLedger>,
    jobs: Arc<dyn JobStatusRepository>,
}

impl WorkerService {
    pub fn new(
        storage: LocalStorage,
        invoker: MediaJobInvoker,
        queue: Arc<dyn JobQueuePort>,
        videos: Arc<dyn VideoRepository>,
        ledger: Arc<dyn TaskLedger>,
        jobs: Arc<dyn JobStatusRepository>,
    ) -> Self {
        Self {
            storage,
            invoker,
            queue,
            videos,
            ledger,
            jobs,
        }
    }

    /// Spawn `count` worker loops.
    pub fn start(self: &Arc<Self>, count: usize) -> Vec<JoinHandle<()>> {
        (0..count)
            .map(|id| {
                let worker = self.clone();
                tokio::spawn(async move {
                    worker.run_worker_loop(id).await;
                })
            })
            .collect()
    }

    pub async fn run_worker_loop(&self, worker_id: usize) {
        info!("[Worker {}] Started", worker_id);
        while let Some(job) = self.queue.dequeue_job().await {
            self.process_job(&job, worker_id).await;
        }
        info!("[Worker {}] Queue closed, stopping", worker_id);
    }

    pub async fn process_job(&self, job: &ConcatJob, worker_id: usize) {
        info!(
            "[Worker {}] Processing concat job {} ({} inputs)",
            worker_id,
            job.id,
            job.inputs.len()
        );
        self.jobs.set_state(&job.id, JobState::Running).await;

        match self.concat(job).await {
            Ok(output) => {
                info!("[Worker {}] Concat completed: {:?}", worker_id, output);
                self.jobs
                    .set_state(&job.id, JobState::Completed { output_file: output })
                    .await;
            }
            Err(e) => {
                error!(
                    "[Worker {}] Concat job {} failed: {} {}",
                    worker_id,
                    job.id,
                    e,
                    e.details().unwrap_or_default()
                );
                self.jobs
                    .set_state(
                        &job.id,
                        JobState::Failed {
                            error: e.to_string(),
                        },
                    )
                    .await;
            }
        }
    }

    async fn concat(&self, job: &ConcatJob) -> EditResult<PathBuf> {
        let manifest = self.storage.path_for(&manifest_file_name(&job.id));
        let output = self.storage.path_for(&concat_file_name(now_nanos()));
        let output = self.invoker.concat(&job.inputs, &manifest, &output).await?;

        self.ledger
            .record_concat_output(LedgerEntry::new(&job.id, output.clone()))
            .await;

        let operation = ConcatOperation {
            input_video_ids: job.video_ids.clone(),
            output_path: output.clone(),
        };
        for video_id in &job.video_ids {
            self.videos.append_concat(video_id, operation.clone()).await;
            self.videos.set_final(video_id, &output).await;
        }

        Ok(output)
    }
}
