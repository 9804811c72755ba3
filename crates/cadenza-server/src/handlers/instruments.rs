//! Instruments API endpoints.
//!
//! Lists the configured instrument sections and the lessons of each section.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use cadenza_site::{Instrument, LessonIndex};
use serde::Serialize;

use crate::error::ServerError;
use crate::html::lesson_url;
use crate::state::AppState;

/// Response for GET /api/instruments.
#[derive(Serialize)]
pub(crate) struct InstrumentsResponse {
    /// Instrument sections in sidebar order.
    instruments: Vec<InstrumentResponse>,
}

/// Instrument item for JSON response.
#[derive(Serialize)]
struct InstrumentResponse {
    /// Display name.
    name: String,
    /// Directory name below the lessons root.
    dir: String,
    /// Page path.
    path: String,
}

impl From<&Instrument> for InstrumentResponse {
    fn from(instrument: &Instrument) -> Self {
        Self {
            name: instrument.name.clone(),
            dir: instrument.dir.clone(),
            path: lesson_url(instrument, None),
        }
    }
}

/// Response for GET /api/instruments/{instrument}/lessons.
#[derive(Serialize)]
pub(crate) struct LessonsResponse {
    /// Instrument display name.
    instrument: String,
    /// Section state: `available`, `empty` or `missingSection`.
    status: &'static str,
    /// Message shown instead of a lesson list.
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    /// Lessons sorted by filename.
    lessons: Vec<LessonItem>,
}

/// Lesson item for JSON response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LessonItem {
    /// Name derived from the filename.
    display_name: String,
    /// File stem used in lesson URLs.
    slug: String,
    /// Page path.
    path: String,
}

/// Handle GET /api/instruments.
pub(crate) async fn get_instruments(
    State(state): State<Arc<AppState>>,
) -> Json<InstrumentsResponse> {
    let instruments = state
        .library
        .instruments()
        .iter()
        .map(InstrumentResponse::from)
        .collect();

    Json(InstrumentsResponse { instruments })
}

/// Handle GET /api/instruments/{instrument}/lessons.
pub(crate) async fn get_lessons(
    Path(instrument): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<LessonsResponse>, ServerError> {
    let instrument = state
        .library
        .instrument(&instrument)
        .ok_or_else(|| ServerError::UnknownInstrument(instrument.clone()))?;

    let index = state.library.lessons(instrument)?;
    let status = match &index {
        LessonIndex::MissingSection => "missingSection",
        LessonIndex::Empty => "empty",
        LessonIndex::Available(_) => "available",
    };

    let lessons = index
        .lessons()
        .iter()
        .map(|lesson| {
            let slug = lesson.slug();
            LessonItem {
                display_name: lesson.display_name.clone(),
                path: lesson_url(instrument, Some(&slug)),
                slug,
            }
        })
        .collect();

    Ok(Json(LessonsResponse {
        instrument: instrument.name.clone(),
        status,
        message: index.message(instrument),
        lessons,
    }))
}
