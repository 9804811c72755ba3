//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cadenza_site::RenderError;
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Instrument is not configured.
    #[error("Unknown instrument: {0}")]
    UnknownInstrument(String),

    /// No lesson with this slug in the instrument section.
    #[error("Lesson not found: {0}")]
    LessonNotFound(String),

    /// Render error from cadenza-site.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Invalid bind address.
    #[error("Invalid address: {0}")]
    Address(#[from] std::net::AddrParseError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    /// HTTP status for this error.
    pub(crate) fn status(&self) -> StatusCode {
        match self {
            Self::UnknownInstrument(_)
            | Self::LessonNotFound(_)
            | Self::Render(RenderError::LessonNotFound(_)) => StatusCode::NOT_FOUND,
            Self::Render(_) | Self::Address(_) | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::UnknownInstrument(name) => {
                json!({"error": "Unknown instrument", "instrument": name})
            }
            Self::LessonNotFound(slug) => json!({"error": "Lesson not found", "lesson": slug}),
            Self::Render(RenderError::LessonNotFound(path)) => {
                json!({"error": "Lesson not found", "path": path.display().to_string()})
            }
            _ => json!({"error": self.to_string()}),
        };

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_not_found_statuses() {
        assert_eq!(
            ServerError::UnknownInstrument("drums".to_owned()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServerError::LessonNotFound("01_Intro".to_owned()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServerError::Render(RenderError::LessonNotFound(PathBuf::from("/x.txt"))).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_io_is_internal_error() {
        let err = ServerError::Io(std::io::Error::other("disk on fire"));

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "I/O error: disk on fire");
    }
}
