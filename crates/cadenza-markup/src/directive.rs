//! Render directive model.

use std::path::PathBuf;

/// One unit of lesson content, independent of any UI framework.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")
)]
pub enum RenderDirective {
    /// Heading; `level` is the number of leading `#` (1-6).
    Heading { level: u8, text: String },
    /// Prose forwarded verbatim to the host's markup renderer.
    Paragraph { text: String },
    /// A blank source line, rendered as minimal vertical whitespace.
    Spacer,
    /// Image; `width_px = None` means full available width.
    Image {
        source: MediaSource,
        caption: String,
        width_px: Option<u32>,
    },
    /// Video file or embedded player.
    Video {
        source: MediaSource,
        caption: String,
        embed_kind: EmbedKind,
        height_px: u32,
    },
    /// Non-fatal problem with a line, shown inline as a warning banner.
    Warning { message: String },
}

impl RenderDirective {
    /// Create a warning directive.
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self::Warning {
            message: message.into(),
        }
    }

    /// Check whether this directive is a warning.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::Warning { .. })
    }
}

/// Where a media reference points to.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum MediaSource {
    /// Remote reference, passed through unchanged.
    Url(String),
    /// Local file under the media root.
    File {
        /// Name as written in the lesson (relative to the media root).
        name: String,
        /// Resolved path on disk.
        path: PathBuf,
    },
}

/// How a video is embedded.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum EmbedKind {
    /// Video file under the media root.
    Local,
    /// Video file served from a remote URL.
    RemoteFile,
    /// YouTube player for the given 11-character video ID.
    #[cfg_attr(feature = "serde", serde(rename = "youtube"))]
    YouTube(String),
}

/// Kind of media a lesson line references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Line prefix introducing this media kind (matched case-insensitively).
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Image => "image:",
            Self::Video => "video:",
        }
    }

    /// Human-readable label used in warnings.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Image => "Image",
            Self::Video => "Video",
        }
    }

    /// Upper-case directive name used in warnings about malformed lines.
    #[must_use]
    pub const fn directive_name(self) -> &'static str {
        match self {
            Self::Image => "IMAGE",
            Self::Video => "VIDEO",
        }
    }
}
