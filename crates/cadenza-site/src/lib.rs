//! Instrument sections, lesson listing and lesson rendering for Cadenza.
//!
//! This crate provides:
//! - [`Library`]: configured instrument sections over a lesson store
//! - [`LessonIndex`]: the lessons of a section, or why there are none
//! - [`RenderedLesson`]: directives of a rendered lesson plus source metadata
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use cadenza_site::{Library, LibraryConfig};
//! use cadenza_storage::FsLessonStore;
//!
//! let store = Arc::new(FsLessonStore::new(PathBuf::from("lessons"), PathBuf::from("images")));
//! let library = Library::new(store, LibraryConfig::default());
//!
//! let home = library.home();
//! for instrument in library.instruments() {
//!     if let Some(lesson) = library.default_lesson(instrument)? {
//!         let rendered = library.render(&lesson)?;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod lesson;
mod library;

pub use lesson::{RenderError, RenderedLesson, render_lesson_file};
pub use library::{Instrument, LessonIndex, Library, LibraryConfig};

// Re-export directive types for convenience
pub use cadenza_markup::{EmbedKind, MediaSource, RenderDirective};
pub use cadenza_storage::LessonReference;
