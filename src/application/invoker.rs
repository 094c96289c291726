use crate::domain::naming::render_manifest;
use crate::error::{EditError, EditResult};
use crate::ports::media::{MediaError, MediaToolPort};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// One media-tool invocation per call. Outputs are checked after the tool
/// reports success; nothing is retried.
#[derive(Clone)]
pub struct MediaJobInvoker {
    tool: Arc<dyn MediaToolPort>,
}

impl MediaJobInvoker {
    pub fn new(tool: Arc<dyn MediaToolPort>) -> Self {
        Self { tool }
    }

    pub async fn trim(
        &self,
        input: &Path,
        start: &str,
        end: &str,
        output: &Path,
    ) -> EditResult<PathBuf> {
        self.tool
            .trim(input, start, end, output)
            .await
            .map_err(|e| EditError::media("An error occurred while processing the video.", e))?;
        verify_output(output).await?;
        info!("Trimmed {:?} [{} - {}] into {:?}", input, start, end, output);
        Ok(output.to_path_buf())
    }

    /// Write `manifest` listing `inputs` (absolute, forward slashes), join
    /// them into `output`, then remove the manifest.
    pub async fn concat(
        &self,
        inputs: &[PathBuf],
        manifest: &Path,
        output: &Path,
    ) -> EditResult<PathBuf> {
        let absolute = inputs
            .iter()
            .map(std::path::absolute)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| EditError::io("Failed to get absolute path", e))?;

        tokio::fs::write(manifest, render_manifest(&absolute))
            .await
            .map_err(|e| EditError::io(format!("Failed to write {}", manifest.display()), e))?;

        let result = self.tool.concat(manifest, output).await;

        if let Err(e) = tokio::fs::remove_file(manifest).await {
            warn!("Could not remove manifest {:?}: {}", manifest, e);
        }

        result.map_err(|e| EditError::media("Failed to concatenate videos.", e))?;
        verify_output(output).await?;
        info!("Concatenated {} inputs into {:?}", inputs.len(), output);
        Ok(output.to_path_buf())
    }

    /// Stream-copy pass-through of `input` into `output`.
    pub async fn remux(&self, input: &Path, output: &Path) -> EditResult<PathBuf> {
        self.tool
            .remux(input, output)
            .await
            .map_err(|e| EditError::media("Failed to re-execute cut task", e))?;
        verify_output(output).await?;
        Ok(output.to_path_buf())
    }
}

/// A tool that reports success but leaves a missing or zero-byte file has
/// still failed.
async fn verify_output(path: &Path) -> EditResult<()> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.len() > 0 => Ok(()),
        _ => Err(EditError::media(
            "The media tool generated an invalid or empty file.",
            MediaError::EmptyOutput(path.to_path_buf()),
        )),
    }
}
