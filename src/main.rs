//! Reelcut binary - single-server deployment.
//!
//! Wires up:
//! - Local adapters (storage directory, ffmpeg subprocess, in-memory state)
//! - Background concat workers
//! - HTTP JSON API

use reelcut::adapters::local::memory::{
    InMemoryJobStatusRepository, InMemoryTaskLedger, InMemoryVideoRepository,
};
use reelcut::adapters::local::{router, AppState, ChannelQueue, FfmpegTool, LocalStorage};
use reelcut::application::editor::EditorService;
use reelcut::application::invoker::MediaJobInvoker;
use reelcut::application::worker::WorkerService;
use reelcut::Config;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("reelcut=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env();

    // 1. Adapters (Local implementations)
    let storage = LocalStorage::new(&config.upload_dir, config.allowed_extensions.clone());
    if let Err(e) = storage.ensure_root().await {
        error!("Failed to create upload directory {:?}: {}", config.upload_dir, e);
        std::process::exit(1);
    }

    let tool = FfmpegTool::new(&config.ffmpeg_path).with_timeout(config.ffmpeg_timeout());
    let invoker = MediaJobInvoker::new(Arc::new(tool));

    let videos = Arc::new(InMemoryVideoRepository::new());
    let ledger = Arc::new(InMemoryTaskLedger::new());
    let jobs = Arc::new(InMemoryJobStatusRepository::new());
    let queue = Arc::new(ChannelQueue::new());

    // 2. Application Services
    let editor = Arc::new(EditorService::new(
        storage.clone(),
        invoker.clone(),
        videos.clone(),
        ledger.clone(),
        jobs.clone(),
        queue.clone(),
    ));

    let worker_service = Arc::new(WorkerService::new(
        storage, invoker, queue, videos, ledger, jobs,
    ));

    // 3. Start Workers
    worker_service.start(config.concat_workers.max(1));

    // 4. HTTP server
    let app = router(AppState {
        editor,
        public_url: config.public_url.clone(),
    });

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", config.addr, config.port))
        .await
        .expect("Failed to bind TCP listener");
    info!("Listening at {}:{}", config.addr, config.port);
    axum::serve(listener, app)
        .await
        .expect("Server failed to start");
}
