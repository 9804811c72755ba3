//! HTTP server for the Cadenza lesson library.
//!
//! This crate provides a native Rust HTTP server using axum, serving:
//! - HTML pages: home, instrument sections and lessons with a sidebar
//! - API endpoints for instruments, lesson lists and lesson directives
//! - Media files (images and videos) from the media directory
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use cadenza_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         lessons_dir: PathBuf::from("lessons"),
//!         media_dir: PathBuf::from("images"),
//!         version: "1.0.0".to_string(),
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum server (cadenza-server)
//!                        │
//!                        ├─► Pages + API (handlers)
//!                        │       │
//!                        │       └─► Library ──► LessonInterpreter ──► LessonStore
//!                        │
//!                        └─► /media (tower-http ServeDir)
//! ```

mod app;
mod error;
mod handlers;
mod html;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use cadenza_config::PageConfig;
use cadenza_site::{Library, LibraryConfig};
use cadenza_storage::{FsLessonStore, LessonStore};
use state::AppState;

pub use error::ServerError;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Root directory with one subdirectory per instrument.
    pub lessons_dir: PathBuf,
    /// Directory media names are resolved against.
    pub media_dir: PathBuf,
    /// Instrument section names in sidebar order.
    pub instruments: Vec<String>,
    /// Cover image shown on the home page.
    pub cover_image: String,
    /// Cache lesson contents by modification time.
    pub cache_enabled: bool,
    /// Page-wide presentation settings.
    pub page: PageConfig,
    /// Enable verbose output.
    pub verbose: bool,
    /// Application version (for `ETag` computation).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let library = LibraryConfig::default();
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
            lessons_dir: PathBuf::from("lessons"),
            media_dir: PathBuf::from("images"),
            instruments: library.instruments,
            cover_image: library.cover_image,
            cache_enabled: true,
            page: PageConfig::default(),
            verbose: false,
            version: String::new(),
        }
    }
}

/// Run the server.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if the address is invalid or the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let store: Arc<dyn LessonStore> = Arc::new(
        FsLessonStore::new(config.lessons_dir.clone(), config.media_dir.clone())
            .with_cache(config.cache_enabled),
    );

    let library = Library::new(
        store,
        LibraryConfig {
            instruments: config.instruments.clone(),
            cover_image: config.cover_image.clone(),
        },
    );

    let state = Arc::new(AppState {
        library,
        page: config.page.clone(),
        verbose: config.verbose,
        version: config.version.clone(),
    });

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from Cadenza config.
///
/// # Arguments
///
/// * `config` - Loaded configuration
/// * `version` - Application version
/// * `verbose` - Enable verbose output
#[must_use]
pub fn server_config_from_config(
    config: &cadenza_config::Config,
    version: String,
    verbose: bool,
) -> ServerConfig {
    let library = &config.library_resolved;
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        lessons_dir: library.lessons_dir.clone(),
        media_dir: library.media_dir.clone(),
        instruments: library.instruments.clone(),
        cover_image: library.cover_image.clone(),
        cache_enabled: library.cache_enabled,
        page: config.page.clone(),
        verbose,
        version,
    }
}
