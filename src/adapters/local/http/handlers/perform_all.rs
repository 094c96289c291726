use crate::adapters::local::http::AppState;
use crate::error::EditResult;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
pub struct PerformAllResponse {
    pub message: &'static str,
    pub output_file: Option<PathBuf>,
    pub output_id: Option<String>,
    pub re_cut_outputs: Vec<PathBuf>,
    pub re_cut_ids: Vec<String>,
}

pub async fn handle(State(state): State<AppState>) -> EditResult<Json<PerformAllResponse>> {
    let run = state.editor.re_execute_all().await?;

    Ok(Json(PerformAllResponse {
        message: "Previous tasks re-executed successfully",
        output_file: run.output_file,
        output_id: run.output_id,
        re_cut_outputs: run.re_cut_outputs,
        re_cut_ids: run.re_cut_ids,
    }))
}
