//! Media reference resolution.
//!
//! Turns the name of an `image:`/`video:` line into a concrete [`MediaSource`]
//! plus dimensions, consulting the lesson store for local files.

use std::path::{Component, Path};

use cadenza_storage::LessonStore;

use crate::directive::{EmbedKind, MediaKind, MediaSource, RenderDirective};
use crate::size::SizeTag;
use crate::youtube::{extract_video_id, is_youtube};

/// URL scheme prefixes treated as remote references.
const REMOTE_PREFIXES: [&str; 2] = ["http://", "https://"];

/// Check whether a media name is a remote URL rather than a local file name.
#[must_use]
pub fn is_remote(name: &str) -> bool {
    REMOTE_PREFIXES.iter().any(|prefix| {
        name.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}

/// Resolves media names against a [`LessonStore`].
///
/// Resolution never fails: problems are reported as
/// [`RenderDirective::Warning`] in place of the requested media.
#[derive(Clone, Copy)]
pub struct MediaResolver<'s> {
    store: &'s dyn LessonStore,
}

impl<'s> MediaResolver<'s> {
    /// Create a resolver backed by a lesson store.
    #[must_use]
    pub fn new(store: &'s dyn LessonStore) -> Self {
        Self { store }
    }

    /// Resolve a media reference to an image, video or warning directive.
    ///
    /// - YouTube links become embeds (or a warning if no video ID is found)
    /// - `http://` / `https://` names are used unchanged
    /// - anything else must exist under the store's media root
    #[must_use]
    pub fn resolve(
        &self,
        kind: MediaKind,
        name: &str,
        caption: &str,
        size: SizeTag,
    ) -> RenderDirective {
        if kind == MediaKind::Video && is_youtube(name) {
            return match extract_video_id(name) {
                Some(video_id) => RenderDirective::Video {
                    source: MediaSource::Url(name.to_owned()),
                    caption: caption.to_owned(),
                    embed_kind: EmbedKind::YouTube(video_id),
                    height_px: size.embed_height(),
                },
                None => RenderDirective::warning("Could not extract YouTube video ID"),
            };
        }

        let remote = is_remote(name);
        let source = if remote {
            MediaSource::Url(name.to_owned())
        } else {
            match self.local_source(name) {
                Ok(source) => source,
                Err(path) => {
                    return RenderDirective::warning(format!(
                        "{} not found: {}",
                        kind.label(),
                        path.display()
                    ));
                }
            }
        };

        match kind {
            MediaKind::Image => RenderDirective::Image {
                source,
                caption: caption.to_owned(),
                width_px: size.image_width(),
            },
            MediaKind::Video => RenderDirective::Video {
                source,
                caption: caption.to_owned(),
                embed_kind: if remote {
                    EmbedKind::RemoteFile
                } else {
                    EmbedKind::Local
                },
                height_px: size.video_height(),
            },
        }
    }

    /// Resolve a local name under the media root.
    ///
    /// Returns the computed path as the error when the file is missing or the
    /// name would escape the media root.
    fn local_source(&self, name: &str) -> Result<MediaSource, std::path::PathBuf> {
        let path = self.store.media_root().join(name);
        let stays_in_root = Path::new(name)
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));

        if stays_in_root && self.store.exists(&path) {
            Ok(MediaSource::File {
                name: name.to_owned(),
                path,
            })
        } else {
            Err(path)
        }
    }
}
