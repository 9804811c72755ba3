//! HTML rendering of directives and pages.
//!
//! Maps each [`RenderDirective`] to an HTML fragment and wraps lesson content
//! in the page shell with the instrument sidebar.

use std::fmt::Write as _;

use cadenza_config::{Layout, PageConfig};
use cadenza_markup::{EmbedKind, MediaSource, RenderDirective};
use cadenza_site::Instrument;
use cadenza_storage::LessonReference;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use pulldown_cmark::{Event, Options, Parser};

/// Characters left unencoded in media URL paths.
const MEDIA_PATH_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

/// Mount point of the media directory.
pub(crate) const MEDIA_PREFIX: &str = "/media/";

const YOUTUBE_EMBED: &str = "https://www.youtube.com/embed/";

const STYLES: &str = "\
body{margin:0;font-family:system-ui,sans-serif;display:flex;min-height:100vh;color:#262730}\
.sidebar{width:18rem;flex-shrink:0;background:#f0f2f6;padding:1.5rem}\
.sidebar ul{list-style:none;padding:0}\
.sidebar a{color:inherit;text-decoration:none}\
.sidebar a.active{font-weight:600;color:#ff4b4b}\
main{flex:1;padding:2rem 3rem}\
body.layout-centered main{max-width:46rem;margin:0 auto}\
.spacer{height:0.5rem}\
figure.media{margin:1rem 0}\
figure.media img.full{width:100%}\
figcaption{color:#808495;font-size:0.875rem}\
.banner{padding:0.75rem 1rem;border-radius:0.5rem;margin:0.5rem 0}\
.banner.warning{background:#fffce7;color:#926c05}\
.banner.error{background:#ffecec;color:#7d353b}\
h1,h2,h3{line-height:1.2}";

/// Escape text for use in HTML content and attribute values.
pub(crate) fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// URL a browser can load the media from.
pub(crate) fn media_url(source: &MediaSource) -> String {
    match source {
        MediaSource::Url(url) => url.clone(),
        MediaSource::File { name, .. } => {
            format!("{MEDIA_PREFIX}{}", utf8_percent_encode(name, MEDIA_PATH_SET))
        }
    }
}

/// URL path of an instrument section or one of its lessons.
pub(crate) fn lesson_url(instrument: &Instrument, slug: Option<&str>) -> String {
    let dir = utf8_percent_encode(&instrument.dir, NON_ALPHANUMERIC);
    match slug {
        Some(slug) => format!("/{dir}/{}", utf8_percent_encode(slug, MEDIA_PATH_SET)),
        None => format!("/{dir}"),
    }
}

/// Render prose as CommonMark. Raw HTML in the source is shown as text.
pub(crate) fn markdown_to_html(text: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(text, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut html = String::with_capacity(text.len() * 3 / 2);
    pulldown_cmark::html::push_html(&mut html, parser);
    html
}

/// Render directives in order.
pub(crate) fn render_directives(directives: &[RenderDirective]) -> String {
    let mut html = String::new();
    for directive in directives {
        render_directive(&mut html, directive);
    }
    html
}

fn render_directive(out: &mut String, directive: &RenderDirective) {
    match directive {
        RenderDirective::Heading { level, text } => {
            let atx = format!("{} {text}", "#".repeat(usize::from(*level)));
            out.push_str(&markdown_to_html(&atx));
        }
        RenderDirective::Paragraph { text } => out.push_str(&markdown_to_html(text)),
        RenderDirective::Spacer => out.push_str("<div class=\"spacer\"></div>\n"),
        RenderDirective::Image {
            source,
            caption,
            width_px,
        } => {
            let size = match width_px {
                Some(width) => format!(" width=\"{width}\""),
                None => " class=\"full\"".to_owned(),
            };
            let _ = write!(
                out,
                "<figure class=\"media\"><img src=\"{}\" alt=\"{}\"{size}>",
                escape_html(&media_url(source)),
                escape_html(caption)
            );
            push_caption(out, caption);
        }
        RenderDirective::Video {
            source,
            caption,
            embed_kind,
            height_px,
        } => {
            out.push_str("<figure class=\"media\">");
            match embed_kind {
                EmbedKind::YouTube(video_id) => {
                    let _ = write!(
                        out,
                        "<iframe src=\"{YOUTUBE_EMBED}{}\" width=\"100%\" height=\"{height_px}\" \
                         title=\"{}\" frameborder=\"0\" \
                         allow=\"accelerometer; autoplay; clipboard-write; encrypted-media; \
                         gyroscope; picture-in-picture\" allowfullscreen></iframe>",
                        escape_html(video_id),
                        escape_html(caption)
                    );
                }
                EmbedKind::Local | EmbedKind::RemoteFile => {
                    let _ = write!(
                        out,
                        "<video controls preload=\"metadata\" src=\"{}\" height=\"{height_px}\"></video>",
                        escape_html(&media_url(source))
                    );
                }
            }
            push_caption(out, caption);
        }
        RenderDirective::Warning { message } => push_banner(out, "warning", message),
    }
}

fn push_caption(out: &mut String, caption: &str) {
    if !caption.is_empty() {
        let _ = write!(out, "<figcaption>{}</figcaption>", escape_html(caption));
    }
    out.push_str("</figure>\n");
}

fn push_banner(out: &mut String, kind: &str, message: &str) {
    let _ = writeln!(
        out,
        "<div class=\"banner {kind}\" role=\"alert\">{}</div>",
        escape_html(message)
    );
}

/// Error banner shown instead of lesson content.
pub(crate) fn error_banner(message: &str) -> String {
    let mut out = String::new();
    push_banner(&mut out, "error", message);
    out
}

/// Warning banner shown instead of a lesson (e.g., an empty instrument section).
pub(crate) fn warning_banner(message: &str) -> String {
    let mut out = String::new();
    push_banner(&mut out, "warning", message);
    out
}

/// Sidebar state for one page.
pub(crate) struct Sidebar<'a> {
    /// All configured instruments.
    pub(crate) instruments: &'a [Instrument],
    /// Instrument currently shown, `None` on the home page.
    pub(crate) selected: Option<&'a Instrument>,
    /// Lessons of the selected instrument.
    pub(crate) lessons: &'a [LessonReference],
    /// Slug of the lesson currently shown.
    pub(crate) selected_lesson: Option<&'a str>,
}

/// Wrap content in the page shell.
pub(crate) fn render_page(page: &PageConfig, sidebar: &Sidebar<'_>, content: &str) -> String {
    let layout_class = match page.layout {
        Layout::Wide => "layout-wide",
        Layout::Centered => "layout-centered",
    };
    let title = escape_html(&page.title);

    let mut html = String::with_capacity(content.len() + 2048);
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n<style>{STYLES}</style>\n</head>\n\
         <body class=\"{layout_class}\">\n<aside class=\"sidebar\">\n\
         <h2><a href=\"/\">{title}</a></h2>\n"
    );
    render_sidebar(&mut html, sidebar);
    let _ = write!(html, "</aside>\n<main>\n{content}</main>\n</body>\n</html>\n");
    html
}

fn render_sidebar(out: &mut String, sidebar: &Sidebar<'_>) {
    out.push_str("<nav>\n<h3>Choose Instrument</h3>\n<ul>\n");
    push_link(out, "/", "Home", sidebar.selected.is_none());
    for instrument in sidebar.instruments {
        let active = sidebar.selected.is_some_and(|s| s.dir == instrument.dir);
        push_link(
            out,
            &lesson_url(instrument, None),
            &instrument.name,
            active,
        );
    }
    out.push_str("</ul>\n");

    if let Some(instrument) = sidebar.selected
        && !sidebar.lessons.is_empty()
    {
        let _ = writeln!(out, "<h3>Select a {} Lesson</h3>\n<ul>", escape_html(&instrument.name));
        for lesson in sidebar.lessons {
            let slug = lesson.slug();
            let active = sidebar.selected_lesson == Some(slug.as_str());
            push_link(
                out,
                &lesson_url(instrument, Some(&slug)),
                &lesson.display_name,
                active,
            );
        }
        out.push_str("</ul>\n");
    }
    out.push_str("</nav>\n");
}

fn push_link(out: &mut String, href: &str, text: &str, active: bool) {
    let class = if active { " class=\"active\"" } else { "" };
    let _ = writeln!(
        out,
        "<li><a href=\"{}\"{class}>{}</a></li>",
        escape_html(href),
        escape_html(text)
    );
}
