//! YouTube link recognition.

use std::sync::LazyLock;

use regex::Regex;

/// 11-character video ID after `v=` or `youtu.be/`, followed by a non-ID
/// character or the end of the link.
static VIDEO_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:v=|(?i:youtu\.be/))([0-9A-Za-z_-]{11})(?:[^0-9A-Za-z_-]|$)")
        .expect("video id regex is valid")
});

/// Check whether a video reference points at YouTube.
#[must_use]
pub fn is_youtube(name: &str) -> bool {
    name.to_ascii_lowercase().contains("youtu")
}

/// Extract the video ID from a YouTube link.
///
/// ```
/// use cadenza_markup::extract_video_id;
///
/// assert_eq!(
///     extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42"),
///     Some("dQw4w9WgXcQ".to_owned())
/// );
/// assert_eq!(extract_video_id("https://www.youtube.com/@channel"), None);
/// ```
#[must_use]
pub fn extract_video_id(url: &str) -> Option<String> {
    VIDEO_ID
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned())
}
