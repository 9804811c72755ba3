//! Filesystem lesson store.
//!
//! Provides [`FsLessonStore`] for reading lessons from a local lessons directory
//! with mtime-based caching of file contents.

use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use glob::Pattern;

use crate::error::{StorageError, StorageErrorKind};
use crate::naming::instrument_dir_name;
use crate::store::{LessonReference, LessonStore};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Extension of lesson files.
const LESSON_EXTENSION: &str = "txt";

/// Cached lesson contents, valid while the file mtime is unchanged.
#[derive(Clone, Debug)]
struct CachedLines {
    mtime: SystemTime,
    lines: Vec<String>,
}

/// Filesystem lesson store.
///
/// Lists `*.txt` files in `<lessons_dir>/<instrument>/` and resolves media names
/// against `media_dir`. Listing always re-scans the directory. When caching is
/// enabled, file contents are kept in memory and re-read only when the file
/// modification time changes.
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use cadenza_storage::{FsLessonStore, LessonStore};
///
/// let store = FsLessonStore::new(PathBuf::from("lessons"), PathBuf::from("images"))
///     .with_cache(true);
/// let lessons = store.list_lesson_files("Guitar")?;
/// ```
#[derive(Debug)]
pub struct FsLessonStore {
    /// Root directory containing one subdirectory per instrument.
    lessons_dir: PathBuf,
    /// Directory containing images and videos.
    media_dir: PathBuf,
    /// Mtime cache for lesson contents (`None` disables caching).
    content_cache: Option<Mutex<HashMap<PathBuf, CachedLines>>>,
}

impl FsLessonStore {
    /// Create a new filesystem store without content caching.
    #[must_use]
    pub fn new(lessons_dir: PathBuf, media_dir: PathBuf) -> Self {
        Self {
            lessons_dir,
            media_dir,
            content_cache: None,
        }
    }

    /// Enable or disable the in-memory content cache.
    #[must_use]
    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.content_cache = enabled.then(|| Mutex::new(HashMap::new()));
        self
    }

    /// Root directory containing the instrument directories.
    #[must_use]
    pub fn lessons_dir(&self) -> &Path {
        &self.lessons_dir
    }

    /// Directory of an instrument section.
    ///
    /// Rejects names that would escape the lessons directory (path separators,
    /// `..`) to prevent path traversal.
    fn instrument_dir(&self, instrument: &str) -> Result<PathBuf, StorageError> {
        let dir_name = instrument_dir_name(instrument);
        let mut components = Path::new(&dir_name).components();
        let is_single_normal = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );

        if !is_single_normal {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(dir_name)
                .with_backend(BACKEND));
        }
        Ok(self.lessons_dir.join(dir_name))
    }

    /// Read and split a lesson file, bypassing the cache.
    fn read_uncached(path: &Path) -> Result<Vec<String>, StorageError> {
        let bytes = fs::read(path)
            .map_err(|e| StorageError::io(e, Some(path.to_path_buf())).with_backend(BACKEND))?;
        let text = String::from_utf8(bytes).map_err(|e| {
            StorageError::new(StorageErrorKind::InvalidData)
                .with_path(path)
                .with_backend(BACKEND)
                .with_source(e)
        })?;
        Ok(text.lines().map(str::to_owned).collect())
    }
}

impl LessonStore for FsLessonStore {
    fn list_lesson_files(&self, instrument: &str) -> Result<Vec<LessonReference>, StorageError> {
        let dir = self.instrument_dir(instrument)?;
        if !dir.is_dir() {
            tracing::debug!(dir = %dir.display(), "Instrument directory missing");
            return Ok(Vec::new());
        }

        let pattern = format!(
            "{}/*.{LESSON_EXTENSION}",
            Pattern::escape(&dir.to_string_lossy())
        );
        let paths = glob::glob(&pattern).map_err(|e| {
            StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(&dir)
                .with_backend(BACKEND)
                .with_source(e)
        })?;

        let mut files: Vec<PathBuf> = paths
            .filter_map(Result::ok)
            .filter(|path| path.is_file())
            .collect();
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        tracing::debug!(dir = %dir.display(), count = files.len(), "Scanned lessons");
        Ok(files.into_iter().map(LessonReference::from_path).collect())
    }

    fn has_instrument(&self, instrument: &str) -> bool {
        self.instrument_dir(instrument)
            .is_ok_and(|dir| dir.is_dir())
    }

    fn read_lines(&self, path: &Path) -> Result<Vec<String>, StorageError> {
        let Some(cache) = &self.content_cache else {
            return Self::read_uncached(path);
        };

        let current_mtime = fs::metadata(path).ok().and_then(|m| m.modified().ok());

        if let (Some(mtime), Ok(cache)) = (current_mtime, cache.lock())
            && let Some(cached) = cache.get(path)
            && cached.mtime == mtime
        {
            tracing::debug!(path = %path.display(), "Lesson cache hit");
            return Ok(cached.lines.clone());
        }

        let lines = Self::read_uncached(path)?;

        if let (Some(mtime), Ok(mut cache)) = (current_mtime, cache.lock()) {
            cache.insert(
                path.to_path_buf(),
                CachedLines {
                    mtime,
                    lines: lines.clone(),
                },
            );
        }

        Ok(lines)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn mtime(&self, path: &Path) -> Result<f64, StorageError> {
        let metadata = fs::metadata(path)
            .map_err(|e| StorageError::io(e, Some(path.to_path_buf())).with_backend(BACKEND))?;
        let modified = metadata
            .modified()
            .map_err(|e| StorageError::io(e, Some(path.to_path_buf())).with_backend(BACKEND))?;
        Ok(modified
            .duration_since(UNIX_EPOCH)
            .map_or(0.0, |d| d.as_secs_f64()))
    }

    fn media_root(&self) -> &Path {
        &self.media_dir
    }
}
