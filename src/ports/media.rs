use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("media tool exited with status {}", describe_exit(.exit_code))]
    Failed {
        exit_code: Option<i32>,
        output: String,
    },

    #[error("media tool timed out after {0} seconds")]
    Timeout(u64),

    #[error("media tool generated an invalid or empty file: {}", .0.display())]
    EmptyOutput(PathBuf),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "unknown (terminated by signal)".to_string(),
    }
}

impl MediaError {
    /// Captured stdout/stderr of the tool, when there is any.
    pub fn tool_output(&self) -> Option<&str> {
        match self {
            MediaError::Failed { output, .. } if !output.is_empty() => Some(output),
            _ => None,
        }
    }
}

/// The external media tool. Every mode is stream-copy, never re-encoding.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaToolPort: Send + Sync {
    /// Keep `input` between `start` and `end`. Timestamps are passed through as given.
    async fn trim(
        &self,
        input: &Path,
        start: &str,
        end: &str,
        output: &Path,
    ) -> Result<(), MediaError>;

    /// Join the files listed in a concat manifest into `output`.
    async fn concat(&self, manifest: &Path, output: &Path) -> Result<(), MediaError>;

    /// Copy `input` into a new container at `output`.
    async fn remux(&self, input: &Path, output: &Path) -> Result<(), MediaError>;
}
