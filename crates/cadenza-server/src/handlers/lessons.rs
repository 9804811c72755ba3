//! Lessons API endpoint.
//!
//! Renders a lesson and returns its directives as JSON together with
//! source metadata.

use std::sync::Arc;
use std::time::{Duration, UNIX_EPOCH};

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use cadenza_site::RenderDirective;
use chrono::{DateTime, Utc};
use md5::{Digest, Md5};
use serde::Serialize;

use crate::error::ServerError;
use crate::handlers::pages::log_warnings;
use crate::state::AppState;

/// Response for GET /api/lessons/{instrument}/{lesson}.
#[derive(Serialize)]
struct LessonResponse {
    /// Lesson metadata.
    meta: LessonMeta,
    /// Render directives in source order.
    directives: Vec<RenderDirective>,
}

/// Lesson metadata.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LessonMeta {
    /// Lesson title derived from the filename.
    title: String,
    /// Instrument display name.
    instrument: String,
    /// File stem used in lesson URLs.
    slug: String,
    /// Source file path.
    source_file: String,
    /// Last modification time (ISO 8601).
    last_modified: String,
}

/// Handle GET /api/lessons/{instrument}/{lesson}.
pub(crate) async fn get_lesson(
    Path((instrument, slug)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let library = &state.library;
    let instrument = library
        .instrument(&instrument)
        .ok_or_else(|| ServerError::UnknownInstrument(instrument.clone()))?;

    let lesson = library
        .find_lesson(instrument, &slug)?
        .ok_or_else(|| ServerError::LessonNotFound(slug.clone()))?;

    let rendered = library.render(&lesson)?;
    log_warnings(&state, &rendered);

    let content = serde_json::to_string(&rendered.directives).unwrap_or_default();
    let etag = compute_etag(&state.version, &content);

    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && if_none_match.as_bytes() == etag.as_bytes()
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    let source_mtime = UNIX_EPOCH + Duration::from_secs_f64(rendered.source_mtime.max(0.0));
    let last_modified: DateTime<Utc> = source_mtime.into();

    let response = LessonResponse {
        meta: LessonMeta {
            title: rendered.title,
            instrument: instrument.name.clone(),
            slug: rendered.slug,
            source_file: rendered.source_path.display().to_string(),
            last_modified: last_modified.to_rfc3339(),
        },
        directives: rendered.directives,
    };

    Ok((
        [
            (header::ETAG, etag),
            (
                header::LAST_MODIFIED,
                last_modified
                    .format("%a, %d %b %Y %H:%M:%S GMT")
                    .to_string(),
            ),
            (header::CACHE_CONTROL, "private, max-age=60".to_string()),
        ],
        Json(response),
    )
        .into_response())
}

/// Compute `ETag` from version and serialized directives.
///
/// MD5 truncated to 16 hex chars.
fn compute_etag(version: &str, content: &str) -> String {
    let hash = Md5::digest(format!("{version}:{content}").as_bytes());
    format!("\"{}\"", &hex::encode(hash)[..16])
}
