//! Platform-specific directory management
//!
//! Provides the shared archive download location following platform
//! conventions (XDG on Linux, Library on macOS).
//!
//! Environment variables can override default directories:
//! - `PANTRY_CACHE_DIR` - Override cache directory
//! - `PANTRY_DOWNLOADS_DIR` - Override shared downloads directory

use std::env;
use std::path::PathBuf;

/// Environment variable names for directory overrides
pub const ENV_CACHE_DIR: &str = "PANTRY_CACHE_DIR";
pub const ENV_DOWNLOADS_DIR: &str = "PANTRY_DOWNLOADS_DIR";

/// Application name used in directory paths
const APP_NAME: &str = "pantry";

/// Subdirectory for downloaded source archives
const DOWNLOADS_SUBDIR: &str = "downloads";

/// Platform-specific directory provider for pantry
#[derive(Debug, Clone)]
pub struct PantryDirs {
    cache_dir: PathBuf,
}

impl PantryDirs {
    /// Create a new `PantryDirs` instance.
    ///
    /// Checks environment variables first, then falls back to platform
    /// defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache_dir: Self::resolve_cache_dir(),
        }
    }

    /// Cache directory path.
    /// - Linux: `$XDG_CACHE_HOME/pantry` or `~/.cache/pantry`
    /// - macOS: `~/Library/Caches/pantry`
    #[must_use]
    pub fn cache_dir(&self) -> PathBuf {
        self.cache_dir.clone()
    }

    /// Shared downloads directory for source archives, reused across
    /// recipe work directories.
    #[must_use]
    pub fn downloads_dir(&self) -> PathBuf {
        if let Ok(path) = env::var(ENV_DOWNLOADS_DIR) {
            return PathBuf::from(path);
        }
        self.cache_dir.join(DOWNLOADS_SUBDIR)
    }

    fn resolve_cache_dir() -> PathBuf {
        if let Ok(path) = env::var(ENV_CACHE_DIR) {
            return PathBuf::from(path);
        }

        dirs::cache_dir()
            .map(|p| p.join(APP_NAME))
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .map(|h| h.join(".cache").join(APP_NAME))
                    .unwrap_or_else(|| PathBuf::from(".").join(".cache").join(APP_NAME))
            })
    }
}

impl Default for PantryDirs {
    fn default() -> Self {
        Self::new()
    }
}
