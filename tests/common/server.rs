//! Server test utilities.

use super::media::FakeMediaTool;
use reelcut::adapters::local::memory::{
    InMemoryJobStatusRepository, InMemoryTaskLedger, InMemoryVideoRepository,
};
use reelcut::adapters::local::{router, AppState, ChannelQueue, LocalStorage};
use reelcut::application::editor::EditorService;
use reelcut::application::invoker::MediaJobInvoker;
use reelcut::application::worker::WorkerService;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

pub const PUBLIC_URL: &str = "http://media.test";

/// A test server wrapper with all dependencies.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub struct TestServer {
    pub router: axum::Router,
    pub editor: Arc<EditorService>,
    _temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestServer {
    /// Create a new test server with temporary storage and a working tool.
    pub async fn new() -> Self {
        Self::with_tool(FakeMediaTool::default()).await
    }

    pub async fn with_tool(tool: FakeMediaTool) -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");

        let storage = LocalStorage::new(
            temp_dir.path().join("uploads"),
            vec![".mp4".to_string(), ".avi".to_string(), ".mov".to_string()],
        );
        storage
            .ensure_root()
            .await
            .expect("Failed to create storage directory");

        let invoker = MediaJobInvoker::new(Arc::new(tool));
        let videos = Arc::new(InMemoryVideoRepository::new());
        let ledger = Arc::new(InMemoryTaskLedger::new());
        let jobs = Arc::new(InMemoryJobStatusRepository::new());
        let queue = Arc::new(ChannelQueue::new());

        let editor = Arc::new(EditorService::new(
            storage.clone(),
            invoker.clone(),
            videos.clone(),
            ledger.clone(),
            jobs.clone(),
            queue.clone(),
        ));
        let worker = Arc::new(WorkerService::new(
            storage, invoker, queue, videos, ledger, jobs,
        ));
        worker.start(1);

        let router = router(AppState {
            editor: editor.clone(),
            public_url: Some(PUBLIC_URL.to_string()),
        });

        Self {
            router,
            editor,
            _temp_dir: temp_dir,
        }
    }

    pub fn upload_dir(&self) -> &Path {
        self.editor.storage().root()
    }
}
