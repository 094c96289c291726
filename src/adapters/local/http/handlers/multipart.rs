use crate::adapters::local::fs::LocalStorage;
use crate::domain::video::UploadedAsset;
use crate::error::{EditError, EditResult};
use axum::extract::multipart::MultipartRejection;
use axum::extract::Multipart;

/// Form field carrying the video files.
pub const VIDEOS_FIELD: &str = "videos";

pub fn accept(multipart: Result<Multipart, MultipartRejection>) -> EditResult<Multipart> {
    multipart.map_err(|e| {
        EditError::validation(format!(
            "The form data is missing or invalid. Please upload videos as multipart form data. ({})",
            e
        ))
    })
}

/// Stream every file in the `videos` field to storage, in form order.
///
/// All-or-nothing: when any file fails, the files already stored by this
/// request are removed again.
pub async fn store_videos(
    storage: &LocalStorage,
    mut multipart: Multipart,
) -> EditResult<Vec<UploadedAsset>> {
    let mut assets = Vec::new();

    let result: EditResult<()> = async {
        while let Some(field) = multipart.next_field().await.map_err(|e| {
            EditError::validation(format!("Failed to parse multipart form: {}", e))
        })? {
            if field.name() != Some(VIDEOS_FIELD) {
                continue;
            }
            let file_name = match field.file_name() {
                Some(name) if !name.is_empty() => name.to_owned(),
                _ => continue,
            };
            assets.push(storage.store(field, &file_name).await?);
        }
        Ok(())
    }
    .await;

    if let Err(e) = result {
        storage.discard(&assets).await;
        return Err(e);
    }

    if assets.is_empty() {
        return Err(EditError::validation("Please upload at least one video."));
    }

    Ok(assets)
}
