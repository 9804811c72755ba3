//! Application state.
//!
//! Shared state for all request handlers.

use cadenza_config::PageConfig;
use cadenza_site::Library;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Lesson library (instrument sections, listing and rendering).
    pub(crate) library: Library,
    /// Page-wide presentation settings.
    pub(crate) page: PageConfig,
    /// Log render warnings.
    pub(crate) verbose: bool,
    /// Application version for `ETag` computation.
    pub(crate) version: String,
}
