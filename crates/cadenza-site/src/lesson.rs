//! Rendered lesson result and render errors.

use std::path::{Path, PathBuf};

use cadenza_markup::{LessonInterpreter, RenderDirective};
use cadenza_storage::{LessonStore, StorageError};
use serde::Serialize;

/// Result of rendering a lesson file.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedLesson {
    /// Display name of the lesson (e.g., "Major Scales").
    pub title: String,
    /// File stem used to address the lesson (e.g., "03_Major_Scales").
    pub slug: String,
    /// One directive per source line.
    pub directives: Vec<RenderDirective>,
    /// Lesson file path.
    #[serde(skip)]
    pub source_path: PathBuf,
    /// Lesson file modification time (Unix timestamp), `0.0` if unknown.
    #[serde(skip)]
    pub source_mtime: f64,
}

impl RenderedLesson {
    /// Messages of all warning directives, in order.
    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.directives.iter().filter_map(|d| match d {
            RenderDirective::Warning { message } => Some(message.as_str()),
            _ => None,
        })
    }
}

/// Error returned when a lesson cannot be rendered.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Lesson file does not exist.
    #[error("Lesson not found: {}", .0.display())]
    LessonNotFound(PathBuf),
    /// Lesson store could not be scanned.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Render a lesson file read through a store.
///
/// Content that exists but cannot be read (I/O failure, invalid UTF-8)
/// becomes a single warning directive.
///
/// # Errors
///
/// Returns [`RenderError::LessonNotFound`] if the file does not exist.
pub fn render_lesson_file(
    store: &dyn LessonStore,
    path: &Path,
) -> Result<Vec<RenderDirective>, RenderError> {
    if !store.exists(path) {
        return Err(RenderError::LessonNotFound(path.to_path_buf()));
    }

    match store.read_lines(path) {
        Ok(lines) => Ok(LessonInterpreter::new(store).render(&lines)),
        Err(e) if e.is_not_found() => Err(RenderError::LessonNotFound(path.to_path_buf())),
        Err(e) => Ok(vec![RenderDirective::warning(format!(
            "Could not read lesson: {e}"
        ))]),
    }
}
