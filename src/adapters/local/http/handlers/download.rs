use crate::adapters::local::http::AppState;
use crate::error::{EditError, EditResult};
use axum::extract::{Query, State};
use axum::http::header::HOST;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    pub id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DownloadResponse {
    pub message: &'static str,
    pub download_url: String,
}

pub async fn handle(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<DownloadQuery>,
) -> EditResult<Json<DownloadResponse>> {
    let id = query
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| {
            EditError::validation("Please provide a valid video ID to download the final video.")
        })?;

    let path = state.editor.resolve_download(&id).await?;

    let base = match &state.public_url {
        Some(url) => url.clone(),
        None => {
            let host = headers
                .get(HOST)
                .and_then(|value| value.to_str().ok())
                .unwrap_or("localhost");
            format!("http://{}", host)
        }
    };

    Ok(Json(DownloadResponse {
        message: "Download link generated successfully",
        download_url: state.editor.storage().public_url(&base, &path),
    }))
}
