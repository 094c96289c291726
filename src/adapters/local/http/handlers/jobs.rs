use crate::adapters::local::http::AppState;
use crate::domain::jobs::JobStatus;
use crate::error::EditResult;
use axum::extract::{Path, State};
use axum::Json;

pub async fn handle(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> EditResult<Json<JobStatus>> {
    Ok(Json(state.editor.job_status(&job_id).await?))
}
