use crate::adapters::local::fs::LocalStorage;
use crate::application::invoker::MediaJobInvoker;
use crate::domain::jobs::{ConcatJob, JobState, JobStatus};
use crate::domain::naming::{
    cut_file_name, extension_of, output_id, re_concat_file_name, re_manifest_file_name,
    rerun_path,
};
use crate::domain::video::{CutOperation, UploadedAsset, VideoRecord};
use crate::error::{EditError, EditResult};
use crate::ports::queue::JobQueuePort;
use crate::ports::repository::{JobStatusRepository, LedgerEntry, TaskLedger, VideoRepository};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};
use uuid::Uuid;

/// Outcome of a re-execute-all pass.
#[derive(Debug, Clone, Serialize)]
pub struct ReExecution {
    pub re_cut_outputs: Vec<PathBuf>,
    /// Download identifiers of `re_cut_outputs`, in the same order.
    pub re_cut_ids: Vec<String>,
    /// `None` when there was nothing in the concat ledger to re-run.
    pub output_file: Option<PathBuf>,
    pub output_id: Option<String>,
}

/// A finished trim and the identifier its output downloads under.
#[derive(Debug, Clone, Serialize)]
pub struct TrimOutput {
    pub output_file: PathBuf,
    pub output_id: String,
}

pub struct EditorService {
    storage: LocalStorage,
    invoker: MediaJobInvoker,
    videos: Arc<dyn VideoRepository>,
    ledger: Arc<dyn TaskLedger>,
    jobs: Arc<dyn JobStatusRepository>,
    queue: Arc<dyn JobQueuePort>,
    reexecution: Mutex<()>,
}

impl EditorService {
    pub fn new(
        storage: LocalStorage,
        invoker: MediaJobInvoker,
        videos: Arc<dyn VideoRepository>,
        ledger: Arc<dyn TaskLedger>,
        jobs: Arc<dyn JobStatusRepository>,
        queue: Arc<dyn JobQueuePort>,
    ) -> Self {
        Self {
            storage,
            invoker,
            videos,
            ledger,
            jobs,
            queue,
            reexecution: Mutex::new(()),
        }
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }

    /// Track freshly stored files, each with an empty history.
    pub async fn register_uploads(&self, assets: &[UploadedAsset]) {
        for asset in assets {
            self.videos.insert(VideoRecord::from(asset)).await;
        }
        info!("Registered {} uploaded video(s)", assets.len());
    }

    /// Cut a stored video. Any tracked identifier can be trimmed, including
    /// ones first seen through a download of a cut or concat output.
    pub async fn trim(
        &self,
        id: &str,
        start_time: &str,
        end_time: &str,
    ) -> EditResult<TrimOutput> {
        let record = self
            .videos
            .get(id)
            .await
            .ok_or_else(|| EditError::not_found(format!("No video found with ID: {}", id)))?;

        let extension = record
            .original_path
            .file_name()
            .and_then(|name| extension_of(&name.to_string_lossy()))
            .unwrap_or_else(|| ".mp4".to_string());
        let output = self
            .storage
            .path_for(&cut_file_name(id, start_time, &extension));

        let output = self
            .invoker
            .trim(&record.original_path, start_time, end_time, &output)
            .await?;

        self.videos
            .append_cut(
                id,
                CutOperation {
                    start_time: start_time.to_string(),
                    end_time: end_time.to_string(),
                    output_path: output.clone(),
                },
            )
            .await;
        self.videos.set_final(id, &output).await;

        let output_id = output_id(&output);
        self.ledger
            .record_cut_output(LedgerEntry::new(&output_id, output.clone()))
            .await;

        Ok(TrimOutput {
            output_file: output,
            output_id,
        })
    }

    /// Register stored inputs and queue a background concat of them, in
    /// order. Returns the job id.
    ///
    /// When the job cannot be queued the inputs are removed again, both
    /// their records and their files.
    pub async fn submit_concat(&self, assets: &[UploadedAsset]) -> EditResult<String> {
        let job = ConcatJob {
            id: Uuid::new_v4().to_string(),
            video_ids: assets.iter().map(|a| a.id.clone()).collect(),
            inputs: assets.iter().map(|a| a.stored_path.clone()).collect(),
        };
        let job_id = job.id.clone();

        // Records exist before any worker can append to their histories.
        self.register_uploads(assets).await;
        self.jobs.set_state(&job_id, JobState::Queued).await;
        if let Err(e) = self.queue.enqueue_job(job).await {
            error!("Could not enqueue concat job {}: {}", job_id, e);
            for asset in assets {
                self.videos.remove(&asset.id).await;
            }
            self.storage.discard(assets).await;
            self.jobs
                .set_state(
                    &job_id,
                    JobState::Failed {
                        error: e.to_string(),
                    },
                )
                .await;
            return Err(EditError::io(
                "Failed to queue the concat task",
                std::io::Error::new(std::io::ErrorKind::BrokenPipe, e),
            ));
        }

        info!("Queued concat job {} with {} inputs", job_id, assets.len());
        Ok(job_id)
    }

    pub async fn job_status(&self, job_id: &str) -> EditResult<JobStatus> {
        self.jobs
            .get(job_id)
            .await
            .ok_or_else(|| EditError::not_found(format!("No concat task found with ID: {}", job_id)))
    }

    /// Re-run every recorded cut output, then re-concatenate every recorded
    /// concat output.
    ///
    /// Each phase works on a snapshot taken when the phase starts, so outputs
    /// produced by this call are only re-run by the next call. Outputs already
    /// produced stay recorded when a later step fails.
    pub async fn re_execute_all(&self) -> EditResult<ReExecution> {
        let _guard = self.reexecution.lock().await;

        let mut re_cut_outputs = Vec::new();
        let mut re_cut_ids = Vec::new();
        for entry in self.ledger.cut_outputs().await {
            let output = rerun_path(&entry.path);
            let output = self.invoker.remux(&entry.path, &output).await?;
            let id = output_id(&output);
            self.ledger
                .record_cut_output(LedgerEntry::new(&id, output.clone()))
                .await;
            re_cut_outputs.push(output);
            re_cut_ids.push(id);
        }

        let concat_outputs: Vec<PathBuf> = self
            .ledger
            .concat_outputs()
            .await
            .into_iter()
            .map(|entry| entry.path)
            .collect();
        if concat_outputs.is_empty() {
            info!(
                "Re-executed {} cut task(s); no concat outputs to re-run",
                re_cut_outputs.len()
            );
            return Ok(ReExecution {
                re_cut_outputs,
                re_cut_ids,
                output_file: None,
                output_id: None,
            });
        }

        let output_id = Uuid::new_v4().to_string();
        let manifest = self.storage.path_for(&re_manifest_file_name(&output_id));
        let output = self.storage.path_for(&re_concat_file_name(now_nanos()));
        let output = self
            .invoker
            .concat(&concat_outputs, &manifest, &output)
            .await
            .map_err(|e| match e {
                EditError::Media { source, .. } => {
                    EditError::media("Failed to re-execute concat task", source)
                }
                other => other,
            })?;
        self.ledger
            .record_concat_output(LedgerEntry::new(&output_id, output.clone()))
            .await;

        info!(
            "Re-executed {} cut task(s) and {} concat output(s) into {:?}",
            re_cut_outputs.len(),
            concat_outputs.len(),
            output
        );
        Ok(ReExecution {
            re_cut_outputs,
            re_cut_ids,
            output_file: Some(output),
            output_id: Some(output_id),
        })
    }

    /// Resolve an identifier to an existing file: the video's original, then
    /// a cut output, then a concat output recorded under that identifier.
    /// The resolved path becomes the video's final path.
    pub async fn resolve_download(&self, id: &str) -> EditResult<PathBuf> {
        let path = match self.videos.get(id).await {
            Some(record) => Some(record.original_path),
            None => match self.ledger.find_cut(id).await {
                Some(path) => Some(path),
                None => self.ledger.find_concat(id).await,
            },
        }
        .ok_or_else(|| {
            EditError::not_found(format!("No video found for the provided ID: {}", id))
        })?;

        match tokio::fs::metadata(&path).await {
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(EditError::not_found(format!(
                    "The file for video ID {} does not exist.",
                    id
                )));
            }
            Err(e) => return Err(EditError::io("Failed to check file existence", e)),
        }

        // Identifiers resolved through the ledger get a record on first download.
        self.videos.get_or_create(id, &path).await;
        self.videos.set_final(id, &path).await;
        Ok(path)
    }

    pub async fn video_info(&self, id: &str) -> EditResult<VideoRecord> {
        self.videos
            .get(id)
            .await
            .ok_or_else(|| EditError::not_found(format!("No video found for the provided ID: {}", id)))
    }

    pub async fn all_video_info(&self) -> EditResult<Vec<VideoRecord>> {
        let records = self.videos.list_all().await;
        if records.is_empty() {
            return Err(EditError::not_found("No video information found"));
        }
        Ok(records)
    }
}

pub(crate) fn now_nanos() -> i64 {
    let now = chrono::Utc::now();
    now.timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_micros() * 1000)
}
