//! In-process stand-in for the ffmpeg subprocess.

use async_trait::async_trait;
use reelcut::ports::media::{MediaError, MediaToolPort};
use std::path::{Path, PathBuf};

/// Copies bytes instead of touching real media. Trim and remux copy the
/// input; concat joins the manifest entries in order.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, Default)]
pub struct FakeMediaTool {
    /// Report success but leave a zero-byte output behind.
    pub empty_output: bool,
    /// Fail every invocation the way a broken input would.
    pub fail: bool,
}

#[allow(dead_code)]
impl FakeMediaTool {
    pub fn empty_output() -> Self {
        Self {
            empty_output: true,
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            empty_output: false,
            fail: true,
        }
    }

    async fn produce(&self, content: Vec<u8>, output: &Path) -> Result<(), MediaError> {
        if self.fail {
            return Err(MediaError::Failed {
                exit_code: Some(1),
                output: "Invalid data found when processing input".to_string(),
            });
        }
        let content = if self.empty_output { Vec::new() } else { content };
        tokio::fs::write(output, content)
            .await
            .map_err(|source| MediaError::Spawn {
                program: "fake".to_string(),
                source,
            })
    }
}

/// Entries of a concat manifest, with `'\''` escapes undone.
pub fn manifest_entries(manifest: &str) -> Vec<PathBuf> {
    manifest
        .lines()
        .filter_map(|line| line.strip_prefix("file '"))
        .filter_map(|rest| rest.strip_suffix('\''))
        .map(|path| PathBuf::from(path.replace("'\\''", "'")))
        .collect()
}

#[async_trait]
impl MediaToolPort for FakeMediaTool {
    async fn trim(
        &self,
        input: &Path,
        _start: &str,
        _end: &str,
        output: &Path,
    ) -> Result<(), MediaError> {
        let content = tokio::fs::read(input).await.unwrap_or_default();
        self.produce(content, output).await
    }

    async fn concat(&self, manifest: &Path, output: &Path) -> Result<(), MediaError> {
        let listing = tokio::fs::read_to_string(manifest)
            .await
            .unwrap_or_default();
        let mut joined = Vec::new();
        for entry in manifest_entries(&listing) {
            joined.extend(tokio::fs::read(entry).await.unwrap_or_default());
        }
        self.produce(joined, output).await
    }

    async fn remux(&self, input: &Path, output: &Path) -> Result<(), MediaError> {
        let content = tokio::fs::read(input).await.unwrap_or_default();
        self.produce(content, output).await
    }
}
