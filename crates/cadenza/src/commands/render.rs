//! `cadenza render` command implementation.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use cadenza_config::Config;
use cadenza_markup::{EmbedKind, MediaSource, RenderDirective};
use cadenza_site::render_lesson_file;
use cadenza_storage::FsLessonStore;
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Path to the lesson file.
    file: PathBuf,

    /// Media directory local names are resolved against
    /// (default: from cadenza.toml, else `images`).
    #[arg(short, long)]
    media_dir: Option<PathBuf>,

    /// Print directives as JSON.
    #[arg(long)]
    json: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if the lesson file does not exist or cannot be read.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let directives = self.directives()?;

        if self.json {
            output.print(&serde_json::to_string_pretty(&directives)?);
            return Ok(());
        }

        for directive in &directives {
            if directive.is_warning() {
                output.warning(&describe(directive));
            } else {
                output.print(&describe(directive));
            }
        }

        let warnings = directives.iter().filter(|d| d.is_warning()).count();
        output.info(&format!(
            "{} directives, {warnings} warnings",
            directives.len()
        ));
        Ok(())
    }

    /// Render the lesson file against the media directory.
    fn directives(&self) -> Result<Vec<RenderDirective>, CliError> {
        let media_dir = match &self.media_dir {
            Some(dir) => dir.clone(),
            None => Config::load(None, None)?.library_resolved.media_dir,
        };
        let lessons_dir = self
            .file
            .parent()
            .map_or_else(PathBuf::new, Path::to_path_buf);
        let store = FsLessonStore::new(lessons_dir, media_dir);

        Ok(render_lesson_file(&store, &self.file)?)
    }
}

/// One-line description of a directive.
fn describe(directive: &RenderDirective) -> String {
    match directive {
        RenderDirective::Heading { level, text } => format!("heading {level}: {text}"),
        RenderDirective::Paragraph { text } => format!("paragraph: {text}"),
        RenderDirective::Spacer => "spacer".to_owned(),
        RenderDirective::Image {
            source,
            caption,
            width_px,
        } => {
            let mut line = format!("image: {}", describe_source(source));
            match width_px {
                Some(width) => {
                    let _ = write!(line, " (width {width}px)");
                }
                None => line.push_str(" (full width)"),
            }
            push_caption(&mut line, caption);
            line
        }
        RenderDirective::Video {
            source,
            caption,
            embed_kind,
            height_px,
        } => {
            let kind = match embed_kind {
                EmbedKind::Local => "local".to_owned(),
                EmbedKind::RemoteFile => "remote".to_owned(),
                EmbedKind::YouTube(id) => format!("youtube {id}"),
            };
            let mut line = format!(
                "video: {} ({kind}, height {height_px}px)",
                describe_source(source)
            );
            push_caption(&mut line, caption);
            line
        }
        RenderDirective::Warning { message } => format!("warning: {message}"),
    }
}

fn describe_source(source: &MediaSource) -> String {
    match source {
        MediaSource::Url(url) => url.clone(),
        MediaSource::File { path, .. } => path.display().to_string(),
    }
}

fn push_caption(line: &mut String, caption: &str) {
    if !caption.is_empty() {
        let _ = write!(line, " \"{caption}\"");
    }
}
