//! Configuration management for Cadenza.
//!
//! Parses `cadenza.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories. Relative paths are
//! resolved against the directory containing the config file.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `server.host`
//! - `page.title`

mod expand;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override lessons directory.
    pub lessons_dir: Option<PathBuf>,
    /// Override media directory.
    pub media_dir: Option<PathBuf>,
    /// Override content cache flag.
    pub cache_enabled: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "cadenza.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Library configuration (paths are relative strings from TOML).
    library: LibraryConfigRaw,
    /// Page-wide presentation settings.
    pub page: PageConfig,

    /// Resolved library configuration (set after loading).
    #[serde(skip)]
    pub library_resolved: LibraryConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8501,
        }
    }
}

/// Raw library configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct LibraryConfigRaw {
    lessons_dir: Option<String>,
    media_dir: Option<String>,
    instruments: Option<Vec<String>>,
    cover_image: Option<String>,
    cache_enabled: Option<bool>,
}

/// Resolved library configuration with absolute paths.
#[derive(Debug)]
pub struct LibraryConfig {
    /// Root directory holding one subdirectory per instrument.
    pub lessons_dir: PathBuf,
    /// Directory local image and video names are resolved against.
    pub media_dir: PathBuf,
    /// Instrument section names in sidebar order.
    pub instruments: Vec<String>,
    /// Cover image file name under the media directory.
    pub cover_image: String,
    /// Whether lesson contents are cached by modification time.
    pub cache_enabled: bool,
}

impl LibraryConfig {
    fn with_base(base: &Path) -> Self {
        Self {
            lessons_dir: base.join("lessons"),
            media_dir: base.join("images"),
            instruments: default_instruments(),
            cover_image: "cover.jpg".to_owned(),
            cache_enabled: true,
        }
    }
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self::with_base(Path::new("."))
    }
}

fn default_instruments() -> Vec<String> {
    ["Piano", "Guitar", "Ukulele"]
        .into_iter()
        .map(str::to_owned)
        .collect()
}

/// Page layout of the host UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Content spans the full browser width.
    #[default]
    Wide,
    /// Content is limited to a centered column.
    Centered,
}

impl Layout {
    /// Lowercase name as used in the config file.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wide => "wide",
            Self::Centered => "centered",
        }
    }
}

/// Page-wide presentation settings, built once at startup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Browser title of every page.
    pub title: String,
    /// Content layout.
    pub layout: Layout,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "Music Lessons 🎵".to_owned(),
            layout: Layout::Wide,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`server.host`").
        field: String,
        /// Error message (e.g., "${`LESSONS_HOST`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `cadenza.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(lessons_dir) = &settings.lessons_dir {
            self.library_resolved.lessons_dir.clone_from(lessons_dir);
        }
        if let Some(media_dir) = &settings.media_dir {
            self.library_resolved.media_dir.clone_from(media_dir);
        }
        if let Some(cache_enabled) = settings.cache_enabled {
            self.library_resolved.cache_enabled = cache_enabled;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            server: ServerConfig::default(),
            library: LibraryConfigRaw::default(),
            page: PageConfig::default(),
            library_resolved: LibraryConfig::with_base(base),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_library()?;
        Ok(())
    }

    /// Validate server configuration.
    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Validate library configuration.
    fn validate_library(&self) -> Result<(), ConfigError> {
        let library = &self.library_resolved;

        if library.instruments.is_empty() {
            return Err(ConfigError::Validation(
                "library.instruments must name at least one instrument".to_owned(),
            ));
        }

        let mut dirs = HashSet::new();
        for name in &library.instruments {
            require_non_empty(name, "library.instruments")?;
            if name.contains(['/', '\\']) || name.trim() == ".." || name.trim() == "." {
                return Err(ConfigError::Validation(format!(
                    "library.instruments: '{name}' is not a valid directory name"
                )));
            }
            if !dirs.insert(name.trim().to_lowercase()) {
                return Err(ConfigError::Validation(format!(
                    "library.instruments: '{name}' is listed more than once"
                )));
            }
        }

        require_non_empty(&library.cover_image, "library.cover_image")?;

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;
        self.page.title = expand::expand_env(&self.page.title, "page.title")?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));
        let raw = &self.library;

        self.library_resolved = LibraryConfig {
            lessons_dir: resolve(raw.lessons_dir.as_deref(), "lessons"),
            media_dir: resolve(raw.media_dir.as_deref(), "images"),
            instruments: raw.instruments.clone().unwrap_or_else(default_instruments),
            cover_image: raw
                .cover_image
                .clone()
                .unwrap_or_else(|| "cover.jpg".to_owned()),
            cache_enabled: raw.cache_enabled.unwrap_or(true),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8501);
        assert_eq!(
            config.library_resolved.lessons_dir,
            PathBuf::from("/test/lessons")
        );
        assert_eq!(
            config.library_resolved.media_dir,
            PathBuf::from("/test/images")
        );
        assert_eq!(
            config.library_resolved.instruments,
            vec!["Piano", "Guitar", "Ukulele"]
        );
        assert_eq!(config.library_resolved.cover_image, "cover.jpg");
        assert!(config.library_resolved.cache_enabled);
        assert_eq!(config.page.title, "Music Lessons 🎵");
        assert_eq!(config.page.layout, Layout::Wide);
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8501);
        assert_eq!(config.page.layout, Layout::Wide);
    }

    #[test]
    fn test_parse_server_config() {
        let toml = r#"
[server]
host = "0.0.0.0"
port = 9000
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_parse_page_config() {
        let toml = r#"
[page]
title = "Guitar Club"
layout = "centered"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.page.title, "Guitar Club");
        assert_eq!(config.page.layout, Layout::Centered);
        assert_eq!(config.page.layout.as_str(), "centered");
    }

    #[test]
    fn test_parse_unknown_layout_fails() {
        let toml = r#"
[page]
layout = "sideways"
"#;
        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[library]
lessons_dir = "content/lessons"
media_dir = "/srv/media"
instruments = ["Violin", "Cello"]
cover_image = "front.png"
cache_enabled = false
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        let library = &config.library_resolved;
        assert_eq!(library.lessons_dir, PathBuf::from("/project/content/lessons"));
        assert_eq!(library.media_dir, PathBuf::from("/srv/media"));
        assert_eq!(library.instruments, vec!["Violin", "Cello"]);
        assert_eq!(library.cover_image, "front.png");
        assert!(!library.cache_enabled);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            r#"
[server]
port = 8600

[library]
lessons_dir = "my_lessons"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.server.port, 8600);
        assert_eq!(
            config.library_resolved.lessons_dir,
            dir.path().join("my_lessons")
        );
        assert_eq!(config.library_resolved.media_dir, dir.path().join("images"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[server\nport = ").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_apply_cli_settings_host() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            host: Some("0.0.0.0".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8501); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_dirs() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            lessons_dir: Some(PathBuf::from("/custom/lessons")),
            media_dir: Some(PathBuf::from("/custom/media")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.library_resolved.lessons_dir,
            PathBuf::from("/custom/lessons")
        );
        assert_eq!(
            config.library_resolved.media_dir,
            PathBuf::from("/custom/media")
        );
    }

    #[test]
    fn test_apply_cli_settings_cache_and_port() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            port: Some(9000),
            cache_enabled: Some(false),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.server.port, 9000);
        assert!(!config.library_resolved.cache_enabled);
        assert_eq!(config.server.host, "127.0.0.1"); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.server.port, 8501);
        assert_eq!(
            config.library_resolved.lessons_dir,
            PathBuf::from("/test/lessons")
        );
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("CADENZA_TEST_CONFIG_HOST", "0.0.0.0");
            std::env::remove_var("CADENZA_TEST_CONFIG_STUDIO");
        }

        let toml = r#"
[server]
host = "${CADENZA_TEST_CONFIG_HOST}"

[page]
title = "${CADENZA_TEST_CONFIG_STUDIO:-Home} Lessons"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.page.title, "Home Lessons");

        unsafe {
            std::env::remove_var("CADENZA_TEST_CONFIG_HOST");
        }
    }

    // Validation tests

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_server_host_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.server.host = "  ".to_owned();
        assert_validation_error(&config, &["server.host", "empty"]);
    }

    #[test]
    fn test_validate_server_port_zero() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.server.port = 0;
        assert_validation_error(&config, &["server.port", "0"]);
    }

    #[test]
    fn test_validate_no_instruments() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.library_resolved.instruments.clear();
        assert_validation_error(&config, &["library.instruments", "at least one"]);
    }

    #[test]
    fn test_validate_instrument_with_separator() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.library_resolved.instruments = vec!["Piano/Keys".to_owned()];
        assert_validation_error(&config, &["Piano/Keys", "not a valid directory name"]);
    }

    #[test]
    fn test_validate_instrument_parent_dir() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.library_resolved.instruments = vec!["..".to_owned()];
        assert_validation_error(&config, &["not a valid directory name"]);
    }

    #[test]
    fn test_validate_duplicate_instrument_dirs() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.library_resolved.instruments = vec!["Piano".to_owned(), "piano".to_owned()];
        assert_validation_error(&config, &["piano", "more than once"]);
    }

    #[test]
    fn test_validate_empty_cover_image() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.library_resolved.cover_image = String::new();
        assert_validation_error(&config, &["library.cover_image"]);
    }

    #[test]
    fn test_load_rejects_invalid_cli_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "").unwrap();
        let overrides = CliSettings {
            host: Some(String::new()),
            ..Default::default()
        };

        let err = Config::load(Some(&path), Some(&overrides)).unwrap_err();

        assert!(err.to_string().contains("server.host"));
    }
}
