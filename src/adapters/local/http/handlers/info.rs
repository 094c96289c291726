use crate::adapters::local::http::AppState;
use crate::domain::video::VideoRecord;
use crate::error::EditResult;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct InfoQuery {
    pub id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum InfoData {
    One(VideoRecord),
    All(Vec<VideoRecord>),
}

#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub message: &'static str,
    pub data: InfoData,
}

/// A single record when `id` is given, every record otherwise.
pub async fn handle(
    State(state): State<AppState>,
    Query(query): Query<InfoQuery>,
) -> EditResult<Json<InfoResponse>> {
    let response = match query.id.filter(|id| !id.is_empty()) {
        Some(id) => InfoResponse {
            message: "Video information retrieved successfully",
            data: InfoData::One(state.editor.video_info(&id).await?),
        },
        None => InfoResponse {
            message: "All video information retrieved successfully",
            data: InfoData::All(state.editor.all_video_info().await?),
        },
    };

    Ok(Json(response))
}
