//! Lesson and instrument naming conventions.

use std::path::Path;

/// Derive the selectable display name of a lesson from its filename.
///
/// The file extension is dropped, leading digits and underscores (ordering
/// prefixes such as `03_`) are stripped, remaining underscores become spaces and
/// the result is title-cased. A name that strips down to nothing falls back to
/// the title-cased stem.
///
/// ```
/// use cadenza_storage::derive_display_name;
///
/// assert_eq!(derive_display_name("03_Major_Scales.txt"), "Major Scales");
/// assert_eq!(derive_display_name("Chord_Basics.txt"), "Chord Basics");
/// ```
#[must_use]
pub fn derive_display_name(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .map_or_else(|| file_name.to_owned(), |s| s.to_string_lossy().into_owned());

    let name = stem
        .trim_start_matches(|c: char| c.is_ascii_digit() || c == '_')
        .replace('_', " ");
    let name = name.trim();

    if name.is_empty() {
        return title_case(stem.trim());
    }
    title_case(name)
}

/// Directory name for an instrument section (`"Piano"` -> `"piano"`).
#[must_use]
pub fn instrument_dir_name(instrument: &str) -> String {
    instrument.trim().to_lowercase()
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest.
fn title_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut in_word = false;

    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            result.push(c);
            in_word = false;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_lesson() {
        assert_eq!(derive_display_name("03_Major_Scales.txt"), "Major Scales");
    }

    #[test]
    fn test_unnumbered_lesson() {
        assert_eq!(derive_display_name("Chord_Basics.txt"), "Chord Basics");
    }

    #[test]
    fn test_lowercase_is_title_cased() {
        assert_eq!(
            derive_display_name("12_reading_sheet_music.txt"),
            "Reading Sheet Music"
        );
    }

    #[test]
    fn test_shouting_is_normalized() {
        assert_eq!(derive_display_name("01_PENTATONIC_RUNS.txt"), "Pentatonic Runs");
    }

    #[test]
    fn test_only_leading_digits_stripped() {
        assert_eq!(derive_display_name("02_top_10_songs.txt"), "Top 10 Songs");
    }

    #[test]
    fn test_leading_numerals_are_stripped_greedily() {
        // The ordering prefix and the "7" of "7th" are one run of digits/underscores.
        assert_eq!(derive_display_name("01_7th_chords.txt"), "Th Chords");
    }

    #[test]
    fn test_digits_reset_word_boundary() {
        assert_eq!(derive_display_name("blues_in_12bar.txt"), "Blues In 12Bar");
    }

    #[test]
    fn test_all_digit_name_falls_back_to_stem() {
        assert_eq!(derive_display_name("0042.txt"), "0042");
    }

    #[test]
    fn test_is_deterministic() {
        let first = derive_display_name("05_Strumming_Patterns.txt");
        let second = derive_display_name("05_Strumming_Patterns.txt");
        assert_eq!(first, second);
    }

    #[test]
    fn test_instrument_dir_name() {
        assert_eq!(instrument_dir_name("Ukulele"), "ukulele");
        assert_eq!(instrument_dir_name(" Piano "), "piano");
    }
}
