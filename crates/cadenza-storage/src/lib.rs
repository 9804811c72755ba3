//! Lesson file store for the Cadenza lesson engine.
//!
//! This crate provides a [`LessonStore`] trait that abstracts how lesson files are
//! listed and read, and how media references are located on disk. This enables:
//!
//! - **Unit testing** of rendering without touching the real filesystem
//! - **Clean separation** between the markup interpreter and I/O operations
//!
//! # Architecture
//!
//! The crate provides:
//! - [`LessonStore`] trait with `list_lesson_files()`, `read_lines()`, `exists()`
//!   and `media_root()` methods
//! - [`FsLessonStore`] implementation for a lessons directory with mtime caching
//! - [`MockLessonStore`] for testing (behind `mock` feature flag)
//! - [`derive_display_name`] for turning lesson filenames into selectable names
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use cadenza_storage::{FsLessonStore, LessonStore};
//!
//! let store = FsLessonStore::new(PathBuf::from("lessons"), PathBuf::from("images"));
//! for lesson in store.list_lesson_files("Piano")? {
//!     println!("{}: {}", lesson.display_name, lesson.file_path.display());
//! }
//! ```

mod error;
mod fs;
#[cfg(feature = "mock")]
mod mock;
mod naming;
mod store;

pub use error::{StorageError, StorageErrorKind};
pub use fs::FsLessonStore;
#[cfg(feature = "mock")]
pub use mock::MockLessonStore;
pub use naming::{derive_display_name, instrument_dir_name};
pub use store::{LessonReference, LessonStore};
