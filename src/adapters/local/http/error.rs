use crate::error::EditError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl EditError {
    fn status_code(&self) -> StatusCode {
        match self {
            EditError::Validation(_) => StatusCode::BAD_REQUEST,
            EditError::NotFound(_) => StatusCode::NOT_FOUND,
            EditError::Media { .. } | EditError::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for EditError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.category(),
            message: self.to_string(),
            details: self.details(),
        };

        if status.is_server_error() {
            error!("{} ({})", body.message, body.details.as_deref().unwrap_or(""));
        }

        (status, Json(body)).into_response()
    }
}
