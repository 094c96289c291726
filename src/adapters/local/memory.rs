//! In-memory repositories. State lives for the process lifetime; every
//! store sits behind its own lock.

use crate::domain::jobs::{JobState, JobStatus};
use crate::domain::video::{ConcatOperation, CutOperation, VideoRecord};
use crate::ports::repository::{JobStatusRepository, LedgerEntry, TaskLedger, VideoRepository};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct InMemoryVideoRepository {
    records: RwLock<HashMap<String, VideoRecord>>,
}

impl InMemoryVideoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VideoRepository for InMemoryVideoRepository {
    async fn insert(&self, record: VideoRecord) {
        self.records
            .write()
            .await
            .entry(record.id.clone())
            .or_insert(record);
    }

    async fn get_or_create(&self, id: &str, origin: &Path) -> VideoRecord {
        self.records
            .write()
            .await
            .entry(id.to_string())
            .or_insert_with(|| VideoRecord::new(id, origin))
            .clone()
    }

    async fn append_cut(&self, id: &str, operation: CutOperation) {
        let mut records = self.records.write().await;
        let record = records
            .entry(id.to_string())
            .or_insert_with(|| VideoRecord::new(id, &operation.output_path));
        record.cut_history.push(operation);
    }

    async fn append_concat(&self, id: &str, operation: ConcatOperation) {
        let mut records = self.records.write().await;
        let record = records
            .entry(id.to_string())
            .or_insert_with(|| VideoRecord::new(id, &operation.output_path));
        record.concat_history.push(operation);
    }

    async fn set_final(&self, id: &str, path: &Path) {
        let mut records = self.records.write().await;
        let record = records
            .entry(id.to_string())
            .or_insert_with(|| VideoRecord::new(id, path));
        record.final_path = Some(path.to_path_buf());
    }

    async fn get(&self, id: &str) -> Option<VideoRecord> {
        self.records.read().await.get(id).cloned()
    }

    async fn remove(&self, id: &str) {
        self.records.write().await.remove(id);
    }

    async fn list_all(&self) -> Vec<VideoRecord> {
        self.records.read().await.values().cloned().collect()
    }
}

#[derive(Debug, Default)]
struct LedgerState {
    cut_outputs: Vec<LedgerEntry>,
    concat_outputs: Vec<LedgerEntry>,
}

#[derive(Debug, Default)]
pub struct InMemoryTaskLedger {
    state: RwLock<LedgerState>,
}

impl InMemoryTaskLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

fn first_with_key(entries: &[LedgerEntry], key: &str) -> Option<PathBuf> {
    entries
        .iter()
        .find(|entry| entry.key == key)
        .map(|entry| entry.path.clone())
}

#[async_trait]
impl TaskLedger for InMemoryTaskLedger {
    async fn record_cut_output(&self, entry: LedgerEntry) {
        self.state.write().await.cut_outputs.push(entry);
    }

    async fn record_concat_output(&self, entry: LedgerEntry) {
        self.state.write().await.concat_outputs.push(entry);
    }

    async fn cut_outputs(&self) -> Vec<LedgerEntry> {
        self.state.read().await.cut_outputs.clone()
    }

    async fn concat_outputs(&self) -> Vec<LedgerEntry> {
        self.state.read().await.concat_outputs.clone()
    }

    async fn find_cut(&self, key: &str) -> Option<PathBuf> {
        first_with_key(&self.state.read().await.cut_outputs, key)
    }

    async fn find_concat(&self, key: &str) -> Option<PathBuf> {
        first_with_key(&self.state.read().await.concat_outputs, key)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryJobStatusRepository {
    jobs: RwLock<HashMap<String, JobState>>,
}

impl InMemoryJobStatusRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobStatusRepository for InMemoryJobStatusRepository {
    async fn set_state(&self, job_id: &str, state: JobState) {
        self.jobs.write().await.insert(job_id.to_string(), state);
    }

    async fn get(&self, job_id: &str) -> Option<JobStatus> {
        self.jobs.read().await.get(job_id).map(|state| JobStatus {
            job_id: job_id.to_string(),
            state: state.clone(),
        })
    }
}
