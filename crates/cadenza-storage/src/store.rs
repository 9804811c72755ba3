//! Lesson store trait and lesson references.
//!
//! # Path Convention
//!
//! Lesson files live one directory per instrument section below a lessons root,
//! using the lowercased instrument name (`"Piano"` -> `<root>/piano/`). Media
//! files live flat under a separate media root. Paths handed out in
//! [`LessonReference::file_path`] are complete paths that can be passed back to
//! [`LessonStore::read_lines`] unchanged.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::StorageError;
use crate::naming::derive_display_name;

/// A lesson file as listed for an instrument section.
///
/// Created by [`LessonStore::list_lesson_files`]; immutable once listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonReference {
    /// Selectable name derived from the filename (e.g., "Major Scales").
    pub display_name: String,
    /// Full path of the lesson file.
    pub file_path: PathBuf,
}

impl LessonReference {
    /// Build a reference for a lesson file, deriving its display name.
    #[must_use]
    pub fn from_path(file_path: impl Into<PathBuf>) -> Self {
        let file_path = file_path.into();
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            display_name: derive_display_name(&file_name),
            file_path,
        }
    }

    /// Stable identifier of the lesson: its file stem (e.g., "03_Major_Scales").
    #[must_use]
    pub fn slug(&self) -> String {
        self.file_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Source of lesson text and media for the lesson interpreter.
///
/// Implementations handle backend-specific details like directory layout and
/// content caching. All methods are safe to call repeatedly: listing always
/// reflects the current state of the backend.
pub trait LessonStore: Send + Sync {
    /// List the lesson files of an instrument section, sorted by filename.
    ///
    /// Returns an empty list when the section has no lessons or its directory
    /// does not exist; use [`LessonStore::has_instrument`] to tell them apart.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the instrument name is not a valid section
    /// name or the backend cannot be scanned.
    fn list_lesson_files(&self, instrument: &str) -> Result<Vec<LessonReference>, StorageError>;

    /// Check whether an instrument section exists.
    fn has_instrument(&self, instrument: &str) -> bool;

    /// Read a lesson file as lines, with line terminators removed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] with kind `NotFound` when the file does not
    /// exist, or another kind when it cannot be read as UTF-8 text.
    fn read_lines(&self, path: &Path) -> Result<Vec<String>, StorageError>;

    /// Check if a file exists.
    ///
    /// Returns `false` on errors (treats errors as "doesn't exist").
    fn exists(&self, path: &Path) -> bool;

    /// Get modification time as seconds since Unix epoch.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the file doesn't exist or mtime can't be retrieved.
    fn mtime(&self, path: &Path) -> Result<f64, StorageError>;

    /// Directory against which non-URL image and video names are resolved.
    fn media_root(&self) -> &Path;
}
