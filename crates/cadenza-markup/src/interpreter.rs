//! Line-by-line lesson interpreter.
//!
//! Each input line produces exactly one [`RenderDirective`]. Lines are
//! classified in order:
//!
//! 1. blank (only whitespace) becomes [`RenderDirective::Spacer`]
//! 2. `image:` / `video:` prefix (case-insensitive) becomes media or a warning
//! 3. one to six `#` followed by whitespace and text becomes a heading
//! 4. anything else is forwarded verbatim as a paragraph

use std::sync::LazyLock;

use cadenza_storage::LessonStore;
use regex::Regex;

use crate::directive::{MediaKind, RenderDirective};
use crate::resolver::MediaResolver;
use crate::size::SizeTag;

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").expect("heading regex is valid"));

/// Interprets lesson lines into render directives.
///
/// The interpreter holds no state between calls, so a single instance can
/// render any number of lessons concurrently.
#[derive(Clone, Copy)]
pub struct LessonInterpreter<'s> {
    resolver: MediaResolver<'s>,
}

impl<'s> LessonInterpreter<'s> {
    /// Create an interpreter resolving media through the given store.
    #[must_use]
    pub fn new(store: &'s dyn LessonStore) -> Self {
        Self {
            resolver: MediaResolver::new(store),
        }
    }

    /// Render lesson lines, one directive per line, in input order.
    ///
    /// Line terminators (`\n`, `\r\n`) left on the input are ignored.
    pub fn render<I>(&self, lines: I) -> Vec<RenderDirective>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        lines
            .into_iter()
            .map(|line| self.render_line(strip_terminator(line.as_ref())))
            .collect()
    }

    /// Render a whole lesson held in memory.
    #[must_use]
    pub fn render_text(&self, text: &str) -> Vec<RenderDirective> {
        self.render(text.lines())
    }

    /// Interpret a single line.
    #[must_use]
    pub fn render_line(&self, line: &str) -> RenderDirective {
        let trimmed = line.trim_start();

        if trimmed.is_empty() {
            return RenderDirective::Spacer;
        }

        for kind in [MediaKind::Image, MediaKind::Video] {
            if let Some(rest) = strip_prefix_ignore_case(trimmed, kind.prefix()) {
                return self.render_media(kind, rest);
            }
        }

        if let Some(caps) = HEADING.captures(trimmed) {
            let text = caps[2].trim();
            if !text.is_empty() {
                #[allow(clippy::cast_possible_truncation)] // at most 6 '#'
                let level = caps[1].len() as u8;
                return RenderDirective::Heading {
                    level,
                    text: text.to_owned(),
                };
            }
        }

        RenderDirective::Paragraph {
            text: line.to_owned(),
        }
    }

    /// Parse `name|caption|size` after a media prefix.
    fn render_media(&self, kind: MediaKind, rest: &str) -> RenderDirective {
        let mut fields = rest.splitn(3, '|').map(str::trim);
        let name = fields.next().unwrap_or_default();
        let caption = fields.next().unwrap_or_default();
        let size = fields.next().map_or(SizeTag::Normal, SizeTag::from_tag_or_default);

        let directive = if name.is_empty() {
            RenderDirective::warning(format!(
                "{}: line found but no filename provided",
                kind.directive_name()
            ))
        } else {
            self.resolver.resolve(kind, name, caption, size)
        };

        if let RenderDirective::Warning { message } = &directive {
            tracing::debug!(kind = kind.label(), %message, "Media line produced a warning");
        }

        directive
    }
}

/// Remove one trailing `\n` or `\r\n`.
fn strip_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

fn strip_prefix_ignore_case<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    let head = line.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &line[prefix.len()..])
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use cadenza_storage::MockLessonStore;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::directive::{EmbedKind, MediaSource};

    fn store() -> MockLessonStore {
        MockLessonStore::new()
            .with_media("photo.jpg")
            .with_media("chords/c_major.png")
            .with_media("lesson.mp4")
    }

    fn paragraph(text: &str) -> RenderDirective {
        RenderDirective::Paragraph {
            text: text.to_owned(),
        }
    }

    #[test]
    fn test_one_directive_per_line() {
        let store = store();
        let interpreter = LessonInterpreter::new(&store);
        let lines = [
            "# Title",
            "",
            "Some text",
            "image:photo.jpg",
            "video:",
            "   ",
            "#NoSpace",
        ];

        let directives = interpreter.render(lines);

        assert_eq!(directives.len(), lines.len());
    }

    #[test]
    fn test_empty_input() {
        let store = store();
        let interpreter = LessonInterpreter::new(&store);

        assert!(interpreter.render(Vec::<String>::new()).is_empty());
        assert!(interpreter.render_text("").is_empty());
    }

    #[test]
    fn test_blank_lines_are_spacers() {
        let store = store();
        let interpreter = LessonInterpreter::new(&store);

        let directives = interpreter.render(["", "   ", "\t", "\n", "\r\n"]);

        assert!(directives.iter().all(|d| *d == RenderDirective::Spacer));
    }

    #[test]
    fn test_heading_levels() {
        let store = store();
        let interpreter = LessonInterpreter::new(&store);

        let directives = interpreter.render(["# One", "### Three  ", "###### Six"]);

        assert_eq!(
            directives,
            vec![
                RenderDirective::Heading {
                    level: 1,
                    text: "One".to_owned()
                },
                RenderDirective::Heading {
                    level: 3,
                    text: "Three".to_owned()
                },
                RenderDirective::Heading {
                    level: 6,
                    text: "Six".to_owned()
                },
            ]
        );
    }

    #[test]
    fn test_heading_requires_whitespace_after_hashes() {
        let store = store();
        let interpreter = LessonInterpreter::new(&store);

        assert_eq!(interpreter.render_line("#NoSpace"), paragraph("#NoSpace"));
    }

    #[test]
    fn test_seven_hashes_is_paragraph() {
        let store = store();
        let interpreter = LessonInterpreter::new(&store);

        assert_eq!(
            interpreter.render_line("####### Too deep"),
            paragraph("####### Too deep")
        );
    }

    #[test]
    fn test_indented_heading() {
        let store = store();
        let interpreter = LessonInterpreter::new(&store);

        assert_eq!(
            interpreter.render_line("  ## Practice"),
            RenderDirective::Heading {
                level: 2,
                text: "Practice".to_owned()
            }
        );
    }

    #[test]
    fn test_hashes_with_only_whitespace_is_paragraph() {
        let store = store();
        let interpreter = LessonInterpreter::new(&store);

        assert_eq!(interpreter.render_line("##   "), paragraph("##   "));
    }

    #[test]
    fn test_paragraph_is_verbatim() {
        let store = store();
        let interpreter = LessonInterpreter::new(&store);

        assert_eq!(
            interpreter.render_line("  Play **slowly**, then *faster*.  "),
            paragraph("  Play **slowly**, then *faster*.  ")
        );
    }

    #[test]
    fn test_terminators_are_stripped() {
        let store = store();
        let interpreter = LessonInterpreter::new(&store);

        let directives = interpreter.render(["Some text\r\n", "More\n"]);

        assert_eq!(directives, vec![paragraph("Some text"), paragraph("More")]);
    }

    #[test]
    fn test_missing_filename_warns_and_continues() {
        let store = store();
        let interpreter = LessonInterpreter::new(&store);

        let directives = interpreter.render(["image:", "Some text"]);

        assert_eq!(
            directives,
            vec![
                RenderDirective::warning("IMAGE: line found but no filename provided"),
                paragraph("Some text"),
            ]
        );
    }

    #[test]
    fn test_empty_name_field_warns() {
        let store = store();
        let interpreter = LessonInterpreter::new(&store);

        assert_eq!(
            interpreter.render_line("video:  |Caption|large"),
            RenderDirective::warning("VIDEO: line found but no filename provided")
        );
    }

    #[test]
    fn test_prefix_is_case_insensitive() {
        let store = store();
        let interpreter = LessonInterpreter::new(&store);

        let directive = interpreter.render_line("IMAGE: photo.jpg | Hands ");

        assert_eq!(
            directive,
            RenderDirective::Image {
                source: MediaSource::File {
                    name: "photo.jpg".to_owned(),
                    path: PathBuf::from("/media/photo.jpg"),
                },
                caption: "Hands".to_owned(),
                width_px: Some(400),
            }
        );
    }

    #[test]
    fn test_image_size_tags() {
        let store = store();
        let interpreter = LessonInterpreter::new(&store);

        let directives = interpreter.render([
            "image:photo.jpg||small",
            "image:photo.jpg||huge",
            "image:photo.jpg||FULL",
            "image:photo.jpg|Caption|large",
        ]);

        let widths: Vec<_> = directives
            .iter()
            .map(|d| match d {
                RenderDirective::Image { width_px, .. } => *width_px,
                other => panic!("expected image, got {other:?}"),
            })
            .collect();
        assert_eq!(widths, vec![Some(300), Some(400), None, Some(600)]);
    }

    #[test]
    fn test_extra_pipes_fall_into_size_field() {
        let store = store();
        let interpreter = LessonInterpreter::new(&store);

        let directive = interpreter.render_line("image:photo.jpg|A|small|extra");

        // Everything after the second pipe is the size field.
        assert!(matches!(
            directive,
            RenderDirective::Image {
                width_px: Some(400),
                ..
            }
        ));
    }

    #[test]
    fn test_nested_media_path() {
        let store = store();
        let interpreter = LessonInterpreter::new(&store);

        let directive = interpreter.render_line("image:chords/c_major.png");

        assert!(matches!(
            directive,
            RenderDirective::Image {
                source: MediaSource::File { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_missing_image() {
        let store = store();
        let interpreter = LessonInterpreter::new(&store);

        assert_eq!(
            interpreter.render_line("image:missing.png|My Caption|large"),
            RenderDirective::warning("Image not found: /media/missing.png")
        );
    }

    #[test]
    fn test_youtube_large() {
        let store = store();
        let interpreter = LessonInterpreter::new(&store);

        let directive = interpreter.render_line("video:https://youtu.be/dQw4w9WgXcQ|Demo|large");

        assert_eq!(
            directive,
            RenderDirective::Video {
                source: MediaSource::Url("https://youtu.be/dQw4w9WgXcQ".to_owned()),
                caption: "Demo".to_owned(),
                embed_kind: EmbedKind::YouTube("dQw4w9WgXcQ".to_owned()),
                height_px: 720,
            }
        );
    }

    #[test]
    fn test_local_video_default_size() {
        let store = store();
        let interpreter = LessonInterpreter::new(&store);

        let directive = interpreter.render_line("video:lesson.mp4");

        assert_eq!(
            directive,
            RenderDirective::Video {
                source: MediaSource::File {
                    name: "lesson.mp4".to_owned(),
                    path: PathBuf::from("/media/lesson.mp4"),
                },
                caption: String::new(),
                embed_kind: EmbedKind::Local,
                height_px: 400,
            }
        );
    }

    #[test]
    fn test_warnings_do_not_stop_rendering() {
        let store = store();
        let interpreter = LessonInterpreter::new(&store);

        let directives = interpreter.render_text(
            "# Lesson\nimage:nope.png\nvideo:https://www.youtube.com/@channel\nKeep going",
        );

        assert_eq!(directives.len(), 4);
        assert!(directives[1].is_warning());
        assert!(directives[2].is_warning());
        assert_eq!(directives[3], paragraph("Keep going"));
    }

    #[test]
    fn test_text_mentioning_image_is_paragraph() {
        let store = store();
        let interpreter = LessonInterpreter::new(&store);

        assert_eq!(
            interpreter.render_line("See the image: below"),
            paragraph("See the image: below")
        );
    }

    #[test]
    fn test_deterministic() {
        let store = store();
        let interpreter = LessonInterpreter::new(&store);
        let text = "# A\n\nimage:photo.jpg|x|small\nvideo:lesson.mp4\ntext";

        assert_eq!(interpreter.render_text(text), interpreter.render_text(text));
    }

    #[test]
    fn test_strip_terminator() {
        assert_eq!(strip_terminator("a\r\n"), "a");
        assert_eq!(strip_terminator("a\n"), "a");
        assert_eq!(strip_terminator("a"), "a");
        assert_eq!(strip_terminator("a\n\n"), "a\n");
    }
}
