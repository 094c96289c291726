//! Local adapters for single-server deployment.

pub mod ffmpeg;
pub mod fs;
pub mod http;
pub mod memory;
pub mod queue;

pub use ffmpeg::FfmpegTool;
pub use fs::LocalStorage;
pub use http::{router, AppState};
pub use queue::ChannelQueue;
