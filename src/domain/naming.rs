//! Naming rules for everything written to the storage directory.
//!
//! The directory is flat: originals are `<id><ext>`, cut outputs
//! `cut_<id>_<start><ext>`, concat outputs `concat_<nanos>.mp4`, and every
//! re-execution output carries an extra `re_` prefix.

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub const DEFAULT_ALLOWED_EXTENSIONS: [&str; 3] = [".mp4", ".avi", ".mov"];

pub const RERUN_PREFIX: &str = "re_";

const CONCAT_EXTENSION: &str = ".mp4";

/// Extension of `file_name` including the leading dot, e.g. `.mp4`.
pub fn extension_of(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext))
}

/// Case-sensitive check against the allow-list. Returns the matched extension.
pub fn admitted_extension(file_name: &str, allowed: &[String]) -> Option<String> {
    extension_of(file_name).filter(|ext| allowed.iter().any(|a| a == ext))
}

pub fn stored_file_name(id: &str, extension: &str) -> String {
    format!("{}{}", id, extension)
}

/// Replaces every character that could not safely appear in a file name.
pub fn sanitize_timestamp(timestamp: &str) -> String {
    static UNSAFE: OnceLock<Regex> = OnceLock::new();
    let re = UNSAFE.get_or_init(|| Regex::new(r"[^0-9A-Za-z.\-]").expect("valid regex"));
    re.replace_all(timestamp, "-").into_owned()
}

pub fn cut_file_name(id: &str, start_time: &str, extension: &str) -> String {
    format!("cut_{}_{}{}", id, sanitize_timestamp(start_time), extension)
}

pub fn concat_file_name(nanos: i64) -> String {
    format!("concat_{}{}", nanos, CONCAT_EXTENSION)
}

pub fn re_concat_file_name(nanos: i64) -> String {
    format!("{}{}", RERUN_PREFIX, concat_file_name(nanos))
}

pub fn manifest_file_name(job_id: &str) -> String {
    format!("filelist_{}.txt", job_id)
}

pub fn re_manifest_file_name(job_id: &str) -> String {
    format!("{}{}", RERUN_PREFIX, manifest_file_name(job_id))
}

/// Sibling path with `re_` prepended to the file name only, so directory
/// components are never rewritten.
pub fn rerun_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{}{}", RERUN_PREFIX, name))
}

/// Download identifier of a cut output: its file name without extension,
/// e.g. `cut_abc_00-00-01`.
pub fn output_id(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Converts a path to forward-slash form for the external tool.
pub fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Concat manifest: one `file '<path>'` line per input, in order.
pub fn render_manifest(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("file '{}'\n", to_slash(p).replace('\'', r"'\''")))
        .collect()
}
