//! Instrument sections and lesson rendering.
//!
//! [`Library`] ties a [`LessonStore`] to the configured instrument sections.
//! Listing always re-scans the store, so lessons added or removed on disk are
//! picked up on the next request.
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use cadenza_site::{Library, LibraryConfig, LessonIndex};
//! use cadenza_storage::FsLessonStore;
//!
//! let store = Arc::new(FsLessonStore::new(PathBuf::from("lessons"), PathBuf::from("images")));
//! let library = Library::new(store, LibraryConfig::default());
//!
//! let piano = library.instrument("piano").unwrap();
//! if let LessonIndex::Available(lessons) = library.lessons(piano)? {
//!     let rendered = library.render(&lessons[0])?;
//! }
//! ```

use std::sync::Arc;

use cadenza_markup::{MediaKind, MediaResolver, RenderDirective, SizeTag};
use cadenza_storage::{LessonReference, LessonStore, instrument_dir_name};
use serde::Serialize;

use crate::lesson::{RenderError, RenderedLesson, render_lesson_file};

/// Configuration for [`Library`].
#[derive(Clone, Debug)]
pub struct LibraryConfig {
    /// Instrument section names in sidebar order.
    pub instruments: Vec<String>,
    /// Cover image file name under the media root.
    pub cover_image: String,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            instruments: vec!["Piano".to_owned(), "Guitar".to_owned(), "Ukulele".to_owned()],
            cover_image: "cover.jpg".to_owned(),
        }
    }
}

/// A configured instrument section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Instrument {
    /// Display name (e.g., "Piano").
    pub name: String,
    /// Directory name below the lessons root (e.g., "piano").
    pub dir: String,
}

impl Instrument {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            dir: instrument_dir_name(name),
        }
    }
}

/// Lessons available for an instrument section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LessonIndex {
    /// The section's directory does not exist.
    MissingSection,
    /// The section exists but contains no lesson files.
    Empty,
    /// Lessons sorted by filename.
    Available(Vec<LessonReference>),
}

impl LessonIndex {
    /// Listed lessons; empty unless [`LessonIndex::Available`].
    #[must_use]
    pub fn lessons(&self) -> &[LessonReference] {
        match self {
            Self::Available(lessons) => lessons,
            Self::MissingSection | Self::Empty => &[],
        }
    }

    /// Informational message shown instead of a lesson list.
    #[must_use]
    pub fn message(&self, instrument: &Instrument) -> Option<String> {
        match self {
            Self::MissingSection => Some(format!("No {} lessons found.", instrument.dir)),
            Self::Empty => Some("No lessons available yet.".to_owned()),
            Self::Available(_) => None,
        }
    }
}

/// Lesson library over a [`LessonStore`].
///
/// Holds no per-lesson state; safe to share across request handlers.
pub struct Library {
    store: Arc<dyn LessonStore>,
    instruments: Vec<Instrument>,
    cover_image: String,
}

impl Library {
    /// Create a library for the configured instrument sections.
    #[must_use]
    pub fn new(store: Arc<dyn LessonStore>, config: LibraryConfig) -> Self {
        let instruments = config.instruments.iter().map(|n| Instrument::new(n)).collect();
        Self {
            store,
            instruments,
            cover_image: config.cover_image,
        }
    }

    /// Configured instrument sections in sidebar order.
    #[must_use]
    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    /// Look up an instrument by display name or directory name, ignoring case.
    #[must_use]
    pub fn instrument(&self, name: &str) -> Option<&Instrument> {
        let dir = instrument_dir_name(name);
        self.instruments.iter().find(|i| i.dir == dir)
    }

    /// Backing lesson store.
    #[must_use]
    pub fn store(&self) -> &dyn LessonStore {
        &*self.store
    }

    /// List the lessons of an instrument section.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Storage`] if the section cannot be scanned.
    pub fn lessons(&self, instrument: &Instrument) -> Result<LessonIndex, RenderError> {
        if !self.store.has_instrument(&instrument.name) {
            tracing::debug!(instrument = %instrument.name, "Instrument section missing");
            return Ok(LessonIndex::MissingSection);
        }

        let lessons = self.store.list_lesson_files(&instrument.name)?;
        tracing::debug!(instrument = %instrument.name, count = lessons.len(), "Listed lessons");

        if lessons.is_empty() {
            Ok(LessonIndex::Empty)
        } else {
            Ok(LessonIndex::Available(lessons))
        }
    }

    /// Find a lesson of an instrument section by slug.
    ///
    /// Returns `None` when the section has no lesson with that slug.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Storage`] if the section cannot be scanned.
    pub fn find_lesson(
        &self,
        instrument: &Instrument,
        slug: &str,
    ) -> Result<Option<LessonReference>, RenderError> {
        Ok(self
            .lessons(instrument)?
            .lessons()
            .iter()
            .find(|l| l.slug() == slug)
            .cloned())
    }

    /// First lesson of an instrument section, selected by default.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Storage`] if the section cannot be scanned.
    pub fn default_lesson(
        &self,
        instrument: &Instrument,
    ) -> Result<Option<LessonReference>, RenderError> {
        Ok(self.lessons(instrument)?.lessons().first().cloned())
    }

    /// Render a lesson into directives.
    ///
    /// Content that exists but cannot be read becomes a single warning
    /// directive rather than an error.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::LessonNotFound`] if the lesson file does not exist.
    pub fn render(&self, lesson: &LessonReference) -> Result<RenderedLesson, RenderError> {
        let path = &lesson.file_path;
        let directives = render_lesson_file(&*self.store, path)?;
        let source_mtime = self.store.mtime(path).unwrap_or(0.0);

        let rendered = RenderedLesson {
            title: lesson.display_name.clone(),
            slug: lesson.slug(),
            directives,
            source_path: path.clone(),
            source_mtime,
        };

        tracing::debug!(
            lesson = %path.display(),
            directives = rendered.directives.len(),
            warnings = rendered.warnings().count(),
            "Rendered lesson"
        );

        Ok(rendered)
    }

    /// Directives for the home page: the cover image and a welcome line.
    #[must_use]
    pub fn home(&self) -> Vec<RenderDirective> {
        let cover = MediaResolver::new(&*self.store).resolve(
            MediaKind::Image,
            &self.cover_image,
            "",
            SizeTag::Full,
        );

        let cover = if cover.is_warning() {
            tracing::debug!(cover = %self.cover_image, "Cover image not found");
            paragraph("Cover image not found.")
        } else {
            cover
        };

        vec![
            cover,
            paragraph("Select an instrument from the sidebar to explore your lessons!"),
        ]
    }
}

fn paragraph(text: &str) -> RenderDirective {
    RenderDirective::Paragraph {
        text: text.to_owned(),
    }
}
