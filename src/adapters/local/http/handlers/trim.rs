use crate::adapters::local::http::AppState;
use crate::error::{EditError, EditResult};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const FORMAT_HINT: &str =
    "Please check the JSON format and required fields (id, start_time, end_time)";

#[derive(Debug, Deserialize)]
pub struct TrimRequest {
    pub id: String,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Serialize)]
pub struct TrimResponse {
    pub message: &'static str,
    pub output_file: PathBuf,
    /// Identifier for `/download?id=` that resolves to `output_file`.
    pub output_id: String,
}

pub async fn handle(
    State(state): State<AppState>,
    payload: Result<Json<TrimRequest>, JsonRejection>,
) -> EditResult<Json<TrimResponse>> {
    let Json(request) =
        payload.map_err(|e| EditError::validation(format!("{}: {}", FORMAT_HINT, e.body_text())))?;

    if [&request.id, &request.start_time, &request.end_time]
        .iter()
        .any(|value| value.trim().is_empty())
    {
        return Err(EditError::validation(FORMAT_HINT));
    }

    let trimmed = state
        .editor
        .trim(&request.id, &request.start_time, &request.end_time)
        .await?;

    Ok(Json(TrimResponse {
        message: "Cut editing completed successfully",
        output_file: trimmed.output_file,
        output_id: trimmed.output_id,
    }))
}
