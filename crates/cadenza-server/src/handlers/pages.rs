//! HTML page endpoints.
//!
//! Renders the home page and instrument lesson pages with the sidebar.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use cadenza_site::{Instrument, LessonReference, RenderedLesson};

use crate::error::ServerError;
use crate::html::{self, Sidebar};
use crate::state::AppState;

/// Handle GET /.
pub(crate) async fn get_home(State(state): State<Arc<AppState>>) -> Response {
    let mut content = String::from("<h1>🎵 Welcome to Your Music Lessons App</h1>\n");
    content.push_str(&html::render_directives(&state.library.home()));

    let sidebar = Sidebar {
        instruments: state.library.instruments(),
        selected: None,
        lessons: &[],
        selected_lesson: None,
    };
    Html(html::render_page(&state.page, &sidebar, &content)).into_response()
}

/// Handle GET /{instrument} (first lesson selected).
pub(crate) async fn get_instrument(
    Path(instrument): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    lesson_page(&state, &instrument, None)
}

/// Handle GET /{instrument}/{lesson}.
pub(crate) async fn get_lesson(
    Path((instrument, lesson)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> Response {
    lesson_page(&state, &instrument, Some(&lesson))
}

/// Shared implementation for instrument pages.
fn lesson_page(state: &AppState, instrument: &str, slug: Option<&str>) -> Response {
    let library = &state.library;
    let Some(instrument) = library.instrument(instrument) else {
        let err = ServerError::UnknownInstrument(instrument.to_owned());
        return error_page(state, None, &err);
    };

    let index = match library.lessons(instrument) {
        Ok(index) => index,
        Err(e) => return error_page(state, Some(instrument), &ServerError::Render(e)),
    };
    let lessons = index.lessons();

    let mut content = format!(
        "<h2>🎶 {} Lessons</h2>\n",
        html::escape_html(&instrument.name)
    );

    let selected = match slug {
        Some(slug) => lessons.iter().find(|l| l.slug() == slug),
        None => lessons.first(),
    };

    let status = if let Some(message) = index.message(instrument) {
        content.push_str(&html::warning_banner(&message));
        StatusCode::OK
    } else if let Some(lesson) = selected {
        match library.render(lesson) {
            Ok(rendered) => {
                log_warnings(state, &rendered);
                content.push_str(&format!(
                    "<h3>{}</h3>\n",
                    html::escape_html(&rendered.title)
                ));
                content.push_str(&html::render_directives(&rendered.directives));
                StatusCode::OK
            }
            Err(e) => {
                let err = ServerError::Render(e);
                content.push_str(&html::error_banner(&render_error_message(&err)));
                err.status()
            }
        }
    } else {
        let err = ServerError::LessonNotFound(slug.unwrap_or_default().to_owned());
        content.push_str(&html::error_banner(&err.to_string()));
        err.status()
    };

    let selected_slug = selected.map(LessonReference::slug);
    let sidebar = Sidebar {
        instruments: library.instruments(),
        selected: Some(instrument),
        lessons,
        selected_lesson: selected_slug.as_deref(),
    };
    (status, Html(html::render_page(&state.page, &sidebar, &content))).into_response()
}

/// Page with only an error banner.
fn error_page(state: &AppState, instrument: Option<&Instrument>, err: &ServerError) -> Response {
    tracing::debug!(error = %err, "Page error");
    let sidebar = Sidebar {
        instruments: state.library.instruments(),
        selected: instrument,
        lessons: &[],
        selected_lesson: None,
    };
    let content = html::error_banner(&render_error_message(err));
    (
        err.status(),
        Html(html::render_page(&state.page, &sidebar, &content)),
    )
        .into_response()
}

/// User-facing message; render errors are shown without the wrapper prefix.
fn render_error_message(err: &ServerError) -> String {
    match err {
        ServerError::Render(e) => e.to_string(),
        other => other.to_string(),
    }
}

/// Log render warnings in verbose mode.
pub(crate) fn log_warnings(state: &AppState, rendered: &RenderedLesson) {
    if state.verbose {
        for warning in rendered.warnings() {
            tracing::warn!(lesson = %rendered.slug, warning = %warning, "Lesson render warning");
        }
    }
}
