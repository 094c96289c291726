use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Background concatenation of already-stored inputs, in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcatJob {
    pub id: String,
    pub video_ids: Vec<String>,
    pub inputs: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum JobState {
    Queued,
    Running,
    Completed { output_file: PathBuf },
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStatus {
    pub job_id: String,
    #[serde(flatten)]
    pub state: JobState,
}
