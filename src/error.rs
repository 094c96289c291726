//! Error taxonomy shared by the application services and the HTTP layer.

use crate::ports::media::MediaError;
use thiserror::Error;

pub type EditResult<T> = Result<T, EditError>;

#[derive(Debug, Error)]
pub enum EditError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    Media {
        message: String,
        #[source]
        source: MediaError,
    },

    #[error("{message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl EditError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn media(msg: impl Into<String>, source: MediaError) -> Self {
        Self::Media {
            message: msg.into(),
            source,
        }
    }

    pub fn io(msg: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: msg.into(),
            source,
        }
    }

    /// Machine-readable category for error bodies.
    pub fn category(&self) -> &'static str {
        match self {
            EditError::Validation(_) => "validation_error",
            EditError::NotFound(_) => "not_found",
            EditError::Media { .. } => "external_tool_error",
            EditError::Io { .. } => "io_error",
        }
    }

    /// Underlying diagnostics, including whatever the media tool printed.
    pub fn details(&self) -> Option<String> {
        match self {
            EditError::Validation(_) | EditError::NotFound(_) => None,
            EditError::Media { source, .. } => Some(match source.tool_output() {
                Some(output) => format!("{}\n{}", source, output),
                None => source.to_string(),
            }),
            EditError::Io { source, .. } => Some(source.to_string()),
        }
    }
}
