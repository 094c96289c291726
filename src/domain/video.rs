use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A file accepted by `/upload` (or as a concat input) and written to storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedAsset {
    pub id: String,
    #[serde(rename = "file_path")]
    pub stored_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutOperation {
    pub start_time: String,
    pub end_time: String,
    pub output_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConcatOperation {
    pub input_video_ids: Vec<String>,
    pub output_path: PathBuf,
}

/// Everything known about one video identifier.
///
/// Histories only grow for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub id: String,
    pub original_path: PathBuf,
    pub cut_history: Vec<CutOperation>,
    pub concat_history: Vec<ConcatOperation>,
    pub final_path: Option<PathBuf>,
}

impl VideoRecord {
    pub fn new(id: impl Into<String>, original_path: impl AsRef<Path>) -> Self {
        Self {
            id: id.into(),
            original_path: original_path.as_ref().to_path_buf(),
            cut_history: Vec::new(),
            concat_history: Vec::new(),
            final_path: None,
        }
    }
}

impl From<&UploadedAsset> for VideoRecord {
    fn from(asset: &UploadedAsset) -> Self {
        VideoRecord::new(&asset.id, &asset.stored_path)
    }
}
