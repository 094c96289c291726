use crate::ports::media::{MediaError, MediaToolPort};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

/// Runs the media tool as a subprocess, one invocation per call.
#[derive(Clone, Debug)]
pub struct FfmpegTool {
    program: String,
    timeout: Option<Duration>,
}

impl FfmpegTool {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            timeout: None,
        }
    }

    /// Kill the process if it runs longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    async fn run(&self, args: Vec<OsString>) -> Result<(), MediaError> {
        debug!("Running {} {:?}", self.program, args);

        let child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| MediaError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let output = match self.timeout {
            // Dropping the timed-out future drops the child, which kills it.
            Some(limit) => match tokio::time::timeout(limit, child.wait_with_output()).await {
                Ok(output) => output,
                Err(_) => {
                    warn!("{} timed out after {:?}, killing process", self.program, limit);
                    return Err(MediaError::Timeout(limit.as_secs()));
                }
            },
            None => child.wait_with_output().await,
        }
        .map_err(|source| MediaError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        if output.status.success() {
            return Ok(());
        }

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        Err(MediaError::Failed {
            exit_code: output.status.code(),
            output: combined,
        })
    }
}

fn trim_args(input: &Path, start: &str, end: &str, output: &Path) -> Vec<OsString> {
    vec![
        "-y".into(),
        "-i".into(),
        input.into(),
        "-ss".into(),
        start.into(),
        "-to".into(),
        end.into(),
        "-c".into(),
        "copy".into(),
        output.into(),
    ]
}

fn concat_args(manifest: &Path, output: &Path) -> Vec<OsString> {
    vec![
        "-y".into(),
        "-f".into(),
        "concat".into(),
        "-safe".into(),
        "0".into(),
        "-i".into(),
        manifest.into(),
        "-c".into(),
        "copy".into(),
        output.into(),
    ]
}

fn remux_args(input: &Path, output: &Path) -> Vec<OsString> {
    vec![
        "-y".into(),
        "-i".into(),
        input.into(),
        "-c".into(),
        "copy".into(),
        output.into(),
    ]
}

#[async_trait]
impl MediaToolPort for FfmpegTool {
    async fn trim(
        &self,
        input: &Path,
        start: &str,
        end: &str,
        output: &Path,
    ) -> Result<(), MediaError> {
        self.run(trim_args(input, start, end, output)).await
    }

    async fn concat(&self, manifest: &Path, output: &Path) -> Result<(), MediaError> {
        self.run(concat_args(manifest, output)).await
    }

    async fn remux(&self, input: &Path, output: &Path) -> Result<(), MediaError> {
        self.run(remux_args(input, output)).await
    }
}
