//! Media size presets.

/// Named preset controlling rendered media dimensions.
///
/// | Tag      | Image width | Video height | YouTube height |
/// |----------|-------------|--------------|----------------|
/// | `small`  | 300         | 300          | 300            |
/// | `normal` | 400         | 400          | 400            |
/// | `large`  | 600         | 600          | 720            |
/// | `full`   | full width  | 720          | 720            |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum SizeTag {
    Small,
    #[default]
    Normal,
    Large,
    Full,
}

impl SizeTag {
    /// Parse a size tag, ignoring case and surrounding whitespace.
    ///
    /// Returns `None` for unrecognized tags.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "small" => Some(Self::Small),
            "normal" => Some(Self::Normal),
            "large" => Some(Self::Large),
            "full" => Some(Self::Full),
            _ => None,
        }
    }

    /// Parse a size tag, falling back to [`SizeTag::Normal`] when unrecognized.
    #[must_use]
    pub fn from_tag_or_default(tag: &str) -> Self {
        Self::from_tag(tag).unwrap_or_default()
    }

    /// Image width in pixels; `None` renders at full available width.
    #[must_use]
    pub const fn image_width(self) -> Option<u32> {
        match self {
            Self::Small => Some(300),
            Self::Normal => Some(400),
            Self::Large => Some(600),
            Self::Full => None,
        }
    }

    /// Player height in pixels for video files.
    #[must_use]
    pub const fn video_height(self) -> u32 {
        match self {
            Self::Small => 300,
            Self::Normal => 400,
            Self::Large => 600,
            Self::Full => 720,
        }
    }

    /// Player height in pixels for embedded YouTube videos.
    #[must_use]
    pub const fn embed_height(self) -> u32 {
        match self {
            Self::Small => 300,
            Self::Normal => 400,
            Self::Large | Self::Full => 720,
        }
    }

    /// Canonical lowercase name of the tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Normal => "normal",
            Self::Large => "large",
            Self::Full => "full",
        }
    }
}

impl std::fmt::Display for SizeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
