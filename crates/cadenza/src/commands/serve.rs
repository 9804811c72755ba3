//! `cadenza serve` command implementation.

use std::path::{Path, PathBuf};

use cadenza_config::{CliSettings, Config};
use cadenza_server::{run_server, server_config_from_config};
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover cadenza.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Lessons directory (overrides config).
    #[arg(short, long, env = "CADENZA_LESSONS_DIR")]
    lessons_dir: Option<PathBuf>,

    /// Media directory for images and videos (overrides config).
    #[arg(short, long, env = "CADENZA_MEDIA_DIR")]
    media_dir: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose output (log render warnings).
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable lesson content caching (default: enabled).
    #[arg(long)]
    cache: Option<bool>,

    /// Disable lesson content caching.
    #[arg(long, conflicts_with = "cache")]
    no_cache: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let cache_enabled = self.resolve_cache_enabled();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            lessons_dir: self.lessons_dir,
            media_dir: self.media_dir,
            cache_enabled,
        };

        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let library = &config.library_resolved;

        ensure_dir(&library.lessons_dir, "lessons")?;
        ensure_dir(&library.media_dir, "media")?;

        output.highlight(&format!("Cadenza {version}"));
        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!(
            "Lessons directory: {}",
            library.lessons_dir.display()
        ));
        output.info(&format!("Media directory: {}", library.media_dir.display()));
        output.info(&format!("Instruments: {}", library.instruments.join(", ")));

        for instrument in &library.instruments {
            let dir = library
                .lessons_dir
                .join(cadenza_storage::instrument_dir_name(instrument));
            if !dir.is_dir() {
                output.warning(&format!(
                    "No lessons directory for {instrument}: {}",
                    dir.display()
                ));
            }
        }

        if library.cache_enabled {
            output.info("Cache: enabled");
        } else {
            output.info("Cache: disabled");
        }

        let server_config = server_config_from_config(&config, version.to_owned(), self.verbose);
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }

    /// Resolve `cache_enabled` from --cache/--no-cache flags.
    fn resolve_cache_enabled(&self) -> Option<bool> {
        self.no_cache.then_some(false).or(self.cache)
    }
}

/// Create a library directory if it does not exist yet.
fn ensure_dir(dir: &Path, what: &str) -> Result<(), CliError> {
    if dir.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(dir).map_err(|e| {
        CliError::Server(format!(
            "Failed to create {what} directory {}: {e}",
            dir.display()
        ))
    })?;
    tracing::info!(path = %dir.display(), "Created {what} directory");
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: ServeArgs,
    }

    fn parse(args: &[&str]) -> ServeArgs {
        TestCli::parse_from(std::iter::once("serve").chain(args.iter().copied())).args
    }

    #[test]
    fn test_resolve_cache_enabled() {
        assert_eq!(parse(&[]).resolve_cache_enabled(), None);
        assert_eq!(parse(&["--no-cache"]).resolve_cache_enabled(), Some(false));
        assert_eq!(parse(&["--cache", "true"]).resolve_cache_enabled(), Some(true));
    }

    #[test]
    fn test_cache_flags_conflict() {
        let result = TestCli::try_parse_from(["serve", "--cache", "true", "--no-cache"]);

        assert!(result.is_err());
    }

    #[test]
    fn test_ensure_dir_creates_missing() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("lessons");

        ensure_dir(&dir, "lessons").unwrap();
        ensure_dir(&dir, "lessons").unwrap();

        assert!(dir.is_dir());
    }
}
