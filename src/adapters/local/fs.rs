use crate::domain::naming::{admitted_extension, stored_file_name, to_slash};
use crate::domain::video::UploadedAsset;
use crate::error::{EditError, EditResult};
use axum::body::Bytes;
use axum::BoxError;
use futures::{Stream, TryStreamExt};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio_util::io::StreamReader;
use tracing::{debug, warn};
use uuid::Uuid;

/// The flat storage directory on local disk.
#[derive(Clone, Debug)]
pub struct LocalStorage {
    root: PathBuf,
    allowed_extensions: Vec<String>,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>, allowed_extensions: Vec<String>) -> Self {
        Self {
            root: root.into(),
            allowed_extensions,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    pub async fn ensure_root(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// Returns the admitted extension, or a validation error naming the file
    /// and the allowed set.
    pub fn admit(&self, file_name: &str) -> EditResult<String> {
        admitted_extension(file_name, &self.allowed_extensions).ok_or_else(|| {
            EditError::validation(format!(
                "File {} has an unsupported format. Allowed formats are: {}.",
                file_name,
                self.allowed_extensions.join(", ")
            ))
        })
    }

    /// Stream `content` to `<root>/<new id><ext>`. The content is copied in
    /// bounded chunks and never buffered whole. A partially written file is
    /// removed on failure.
    pub async fn store<S, E>(&self, content: S, file_name: &str) -> EditResult<UploadedAsset>
    where
        S: Stream<Item = Result<Bytes, E>>,
        E: Into<BoxError>,
    {
        let extension = self.admit(file_name)?;
        let id = Uuid::new_v4().to_string();
        let path = self.path_for(&stored_file_name(&id, &extension));

        debug!("Saving {} to {:?}", file_name, path);
        if let Err(err) = stream_to_file(&path, content).await {
            if let Err(cleanup) = tokio::fs::remove_file(&path).await {
                if cleanup.kind() != io::ErrorKind::NotFound {
                    warn!("Could not remove partial file {:?}: {}", path, cleanup);
                }
            }
            return Err(EditError::io(
                format!("An error occurred while saving the file: {}", file_name),
                err,
            ));
        }

        Ok(UploadedAsset {
            id,
            stored_path: path,
        })
    }

    /// Remove files stored earlier in a request that later failed.
    pub async fn discard(&self, assets: &[UploadedAsset]) {
        for asset in assets {
            if let Err(e) = tokio::fs::remove_file(&asset.stored_path).await {
                warn!("Could not discard {:?}: {}", asset.stored_path, e);
            }
        }
    }

    /// Download link for a stored file, served under `/uploads`.
    pub fn public_url(&self, base: &str, path: &Path) -> String {
        let relative = path
            .strip_prefix(&self.root)
            .map(to_slash)
            .unwrap_or_else(|_| {
                path.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default()
            });
        format!(
            "{}/uploads/{}",
            base.trim_end_matches('/'),
            relative.trim_start_matches('/')
        )
    }
}

// Save a `Stream` to a file
async fn stream_to_file<S, E>(path: &Path, stream: S) -> io::Result<()>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: Into<BoxError>,
{
    let body_with_io_error = stream.map_err(|err| io::Error::new(io::ErrorKind::Other, err));
    let body_reader = StreamReader::new(body_with_io_error);
    futures::pin_mut!(body_reader);

    let mut file = BufWriter::new(File::create(path).await?);
    tokio::io::copy(&mut body_reader, &mut file).await?;
    file.flush().await?;

    Ok(())
}
