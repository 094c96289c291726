//! Configuration loaded from the environment (and `.env`, when present).

use crate::domain::naming::DEFAULT_ALLOWED_EXTENSIONS;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

#[derive(Clone, Debug)]
pub struct Config {
    /// HTTP server bind address
    pub addr: String,
    /// HTTP server port
    pub port: String,
    /// Flat directory holding uploads, cut/concat outputs and manifests
    pub upload_dir: PathBuf,
    /// Media tool executable
    pub ffmpeg_path: String,
    /// Kill the media tool after this many seconds; no limit when unset
    pub ffmpeg_timeout_secs: Option<u64>,
    /// Base for download links, e.g. `https://cdn.example.com`.
    /// When unset, links are built from the request's Host header.
    pub public_url: Option<String>,
    /// Case-sensitive, dot-prefixed extensions accepted on upload
    pub allowed_extensions: Vec<String>,
    /// Background concat workers
    pub concat_workers: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: String::from("0.0.0.0"),
            port: String::from("8080"),
            upload_dir: PathBuf::from("./uploads"),
            ffmpeg_path: String::from("ffmpeg"),
            ffmpeg_timeout_secs: None,
            public_url: None,
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            concat_workers: 2,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        let defaults = Self::default();

        Self {
            addr: env::var("ADDR").unwrap_or(defaults.addr),
            port: env::var("PORT").unwrap_or(defaults.port),
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            ffmpeg_path: env::var("FFMPEG_PATH").unwrap_or(defaults.ffmpeg_path),
            ffmpeg_timeout_secs: parse_var("FFMPEG_TIMEOUT_SECS").filter(|secs| *secs > 0),
            public_url: env::var("PUBLIC_URL")
                .ok()
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty()),
            allowed_extensions: env::var("ALLOWED_EXTENSIONS")
                .ok()
                .map(|list| parse_extensions(&list))
                .filter(|list| !list.is_empty())
                .unwrap_or(defaults.allowed_extensions),
            concat_workers: parse_var("CONCAT_WORKERS")
                .filter(|n| *n > 0)
                .unwrap_or(defaults.concat_workers),
        }
    }

    pub fn ffmpeg_timeout(&self) -> Option<Duration> {
        self.ffmpeg_timeout_secs.map(Duration::from_secs)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring invalid value {:?} for {}", raw, key);
            None
        }
    }
}

/// `mp4, .mov` -> `[".mp4", ".mov"]`
fn parse_extensions(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|ext| !ext.is_empty())
        .map(|ext| {
            if ext.starts_with('.') {
                ext.to_string()
            } else {
                format!(".{}", ext)
            }
        })
        .collect()
}
