//! `cadenza list` command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use cadenza_config::Config;
use cadenza_site::{Library, LibraryConfig};
use cadenza_storage::FsLessonStore;
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the list command.
#[derive(Args)]
pub(crate) struct ListArgs {
    /// Instrument name (e.g., Piano).
    instrument: String,

    /// Path to configuration file (default: auto-discover cadenza.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ListArgs {
    /// Execute the list command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the instrument is not
    /// configured, or the section cannot be scanned.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), None)?;
        let resolved = &config.library_resolved;
        let store = FsLessonStore::new(resolved.lessons_dir.clone(), resolved.media_dir.clone());
        let library = Library::new(
            Arc::new(store),
            LibraryConfig {
                instruments: resolved.instruments.clone(),
                cover_image: resolved.cover_image.clone(),
            },
        );

        let Some(instrument) = library.instrument(&self.instrument) else {
            return Err(CliError::Validation(format!(
                "Unknown instrument: {} (configured: {})",
                self.instrument,
                resolved.instruments.join(", ")
            )));
        };

        let index = library.lessons(instrument)?;
        if let Some(message) = index.message(instrument) {
            output.warning(&message);
            return Ok(());
        }

        output.highlight(&format!("{} Lessons", instrument.name));
        output.separator();
        for lesson in index.lessons() {
            let file = lesson
                .file_path
                .file_name()
                .map_or_else(String::new, |f| f.to_string_lossy().into_owned());
            output.print_with_note(&lesson.display_name, &file);
        }
        output.success(&format!("{} lessons", index.lessons().len()));

        Ok(())
    }
}
