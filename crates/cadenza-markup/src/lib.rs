//! Lesson markup interpreter.
//!
//! This crate turns the lines of a plain-text lesson file into an ordered list of
//! [`RenderDirective`]s that a host UI maps to its own widgets.
//!
//! # Architecture
//!
//! - [`LessonInterpreter`]: classifies each line (spacer, image, video, heading,
//!   paragraph) and emits exactly one directive per line
//! - [`MediaResolver`]: resolves `image:`/`video:` references to remote URLs,
//!   YouTube embeds or files under the store's media root
//! - [`SizeTag`]: named presets controlling rendered media dimensions
//!
//! Malformed lines never abort rendering: they become [`RenderDirective::Warning`]
//! and the following lines are still interpreted.
//!
//! # Example
//!
//! ```
//! use cadenza_markup::{LessonInterpreter, RenderDirective};
//! use cadenza_storage::FsLessonStore;
//!
//! let store = FsLessonStore::new("lessons".into(), "images".into());
//! let interpreter = LessonInterpreter::new(&store);
//!
//! let directives = interpreter.render(["## Warm-up", "", "image:"]);
//! assert_eq!(
//!     directives[0],
//!     RenderDirective::Heading { level: 2, text: "Warm-up".to_owned() }
//! );
//! assert_eq!(directives[1], RenderDirective::Spacer);
//! assert!(directives[2].is_warning());
//! ```

mod directive;
mod interpreter;
mod resolver;
mod size;
mod youtube;

pub use directive::{EmbedKind, MediaKind, MediaSource, RenderDirective};
pub use interpreter::LessonInterpreter;
pub use resolver::{MediaResolver, is_remote};
pub use size::SizeTag;
pub use youtube::{extract_video_id, is_youtube};
