use crate::domain::jobs::{JobState, JobStatus};
use crate::domain::video::{ConcatOperation, CutOperation, VideoRecord};
use async_trait::async_trait;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// Register a record. An existing record with the same id is kept.
    async fn insert(&self, record: VideoRecord);

    /// Existing record, or a new empty one whose origin is `origin`.
    async fn get_or_create(&self, id: &str, origin: &Path) -> VideoRecord;

    /// Append to the cut history. An unknown id gets a record whose origin is the output path.
    async fn append_cut(&self, id: &str, operation: CutOperation);

    /// Append to the concat history. An unknown id gets a record whose origin is the output path.
    async fn append_concat(&self, id: &str, operation: ConcatOperation);

    /// Overwrite the final path, creating the record (origin = `path`) if needed.
    async fn set_final(&self, id: &str, path: &Path);

    async fn get(&self, id: &str) -> Option<VideoRecord>;

    /// Forget a record. Used to roll back registrations that never took effect.
    async fn remove(&self, id: &str);

    /// All records, in no particular order.
    async fn list_all(&self) -> Vec<VideoRecord>;
}

/// One produced output, keyed by the identifier it can be downloaded under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    pub key: String,
    pub path: PathBuf,
}

impl LedgerEntry {
    pub fn new(key: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            key: key.into(),
            path: path.into(),
        }
    }
}

/// Process-wide, append-only log of cut and concat outputs.
#[async_trait]
pub trait TaskLedger: Send + Sync {
    async fn record_cut_output(&self, entry: LedgerEntry);

    async fn record_concat_output(&self, entry: LedgerEntry);

    /// Snapshot of the cut outputs, oldest first.
    async fn cut_outputs(&self) -> Vec<LedgerEntry>;

    /// Snapshot of the concat outputs, oldest first.
    async fn concat_outputs(&self) -> Vec<LedgerEntry>;

    /// First cut output recorded under exactly `key`.
    async fn find_cut(&self, key: &str) -> Option<PathBuf>;

    /// First concat output recorded under exactly `key`.
    async fn find_concat(&self, key: &str) -> Option<PathBuf>;
}

#[async_trait]
pub trait JobStatusRepository: Send + Sync {
    async fn set_state(&self, job_id: &str, state: JobState);

    async fn get(&self, job_id: &str) -> Option<JobStatus>;
}
