//! Mock lesson store for testing.
//!
//! Provides [`MockLessonStore`] for unit testing without filesystem access.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::{StorageError, StorageErrorKind};
use crate::naming::instrument_dir_name;
use crate::store::{LessonReference, LessonStore};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// A lesson held in memory.
#[derive(Debug, Clone)]
struct MockFile {
    /// Lesson text, or `None` for a file that exists but cannot be read.
    content: Option<String>,
    mtime: f64,
}

/// Mock lesson store for testing.
///
/// Lessons live under the virtual root `/lessons/<instrument>/`, media under
/// `/media/`. Use the builder methods to configure the mock with test data.
///
/// # Example
///
/// ```ignore
/// use cadenza_storage::{LessonStore, MockLessonStore};
///
/// let store = MockLessonStore::new()
///     .with_lesson("Piano", "01_Intro.txt", "# Intro\nWelcome!")
///     .with_media("keys.png");
///
/// let lessons = store.list_lesson_files("Piano").unwrap();
/// let lines = store.read_lines(&lessons[0].file_path).unwrap();
/// ```
#[derive(Debug)]
pub struct MockLessonStore {
    lessons_root: PathBuf,
    media_root: PathBuf,
    instruments: RwLock<BTreeSet<String>>,
    files: RwLock<BTreeMap<PathBuf, MockFile>>,
    media: RwLock<BTreeSet<PathBuf>>,
}

impl Default for MockLessonStore {
    fn default() -> Self {
        Self {
            lessons_root: PathBuf::from("/lessons"),
            media_root: PathBuf::from("/media"),
            instruments: RwLock::new(BTreeSet::new()),
            files: RwLock::new(BTreeMap::new()),
            media: RwLock::new(BTreeSet::new()),
        }
    }
}

impl MockLessonStore {
    /// Create a new empty mock store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Path a lesson file of an instrument is stored under.
    #[must_use]
    pub fn lesson_path(&self, instrument: &str, file_name: &str) -> PathBuf {
        self.lessons_root
            .join(instrument_dir_name(instrument))
            .join(file_name)
    }

    /// Add an (initially empty) instrument section.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_instrument(self, instrument: &str) -> Self {
        self.instruments
            .write()
            .unwrap()
            .insert(instrument_dir_name(instrument));
        self
    }

    /// Add a lesson file with content, creating its instrument section.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_lesson(self, instrument: &str, file_name: &str, content: &str) -> Self {
        self.insert_file(instrument, file_name, Some(content.to_owned()));
        self
    }

    /// Add a lesson file that is listed but fails to read.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_unreadable_lesson(self, instrument: &str, file_name: &str) -> Self {
        self.insert_file(instrument, file_name, None);
        self
    }

    /// Add a media file under the media root.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_media(self, name: &str) -> Self {
        self.media.write().unwrap().insert(self.media_root.join(name));
        self
    }

    /// Replace the content of a lesson, bumping its modification time.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn set_content(&self, instrument: &str, file_name: &str, content: &str) {
        self.insert_file(instrument, file_name, Some(content.to_owned()));
    }

    /// Remove a lesson file, keeping its instrument section.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn remove_lesson(&self, instrument: &str, file_name: &str) {
        let path = self.lesson_path(instrument, file_name);
        self.files.write().unwrap().remove(&path);
    }

    fn insert_file(&self, instrument: &str, file_name: &str, content: Option<String>) {
        self.instruments
            .write()
            .unwrap()
            .insert(instrument_dir_name(instrument));

        let path = self.lesson_path(instrument, file_name);
        let mut files = self.files.write().unwrap();
        let mtime = files.get(&path).map_or(1.0, |f| f.mtime + 1.0);
        files.insert(path, MockFile { content, mtime });
    }
}

impl LessonStore for MockLessonStore {
    fn list_lesson_files(&self, instrument: &str) -> Result<Vec<LessonReference>, StorageError> {
        let dir = self.lessons_root.join(instrument_dir_name(instrument));
        let files = self.files.read().unwrap();

        // BTreeMap keeps paths, and therefore filenames within a directory, sorted.
        Ok(files
            .keys()
            .filter(|path| path.parent() == Some(dir.as_path()))
            .filter(|path| path.extension().is_some_and(|e| e == "txt"))
            .map(|path| LessonReference::from_path(path.clone()))
            .collect())
    }

    fn has_instrument(&self, instrument: &str) -> bool {
        self.instruments
            .read()
            .unwrap()
            .contains(&instrument_dir_name(instrument))
    }

    fn read_lines(&self, path: &Path) -> Result<Vec<String>, StorageError> {
        let files = self.files.read().unwrap();
        let file = files
            .get(path)
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))?;
        let content = file.content.as_deref().ok_or_else(|| {
            StorageError::new(StorageErrorKind::PermissionDenied)
                .with_path(path)
                .with_backend(BACKEND)
        })?;
        Ok(content.lines().map(str::to_owned).collect())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.read().unwrap().contains_key(path) || self.media.read().unwrap().contains(path)
    }

    fn mtime(&self, path: &Path) -> Result<f64, StorageError> {
        self.files
            .read()
            .unwrap()
            .get(path)
            .map(|f| f.mtime)
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))
    }

    fn media_root(&self) -> &Path {
        &self.media_root
    }
}
