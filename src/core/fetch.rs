//! Source fetch logic
//!
//! Downloads the archive for a recipe version, verifies its checksum,
//! extracts it, and renames the extracted tree to the conventional source
//! subfolder. Already-downloaded archives with a matching checksum are
//! reused unless the caller forces a re-download.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::defaults;
use crate::core::recipe::RecipeDefinition;
use crate::error::{DownloadError, ExtractError, RecipeError};
use crate::infra::dirs::PantryDirs;
use crate::infra::download::{verify_checksum, DownloadManager, ProgressCallback};
use crate::infra::extract;

/// Errors that can occur during fetch
#[derive(Error, Debug)]
pub enum FetchError {
    /// Recipe error
    #[error(transparent)]
    Recipe(#[from] RecipeError),

    /// Download error
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// Extract error
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// IO error
    #[error("IO error for '{path}': {error}")]
    IoError { path: PathBuf, error: String },
}

/// Options for fetching sources
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Explicit version; the newest declared version when absent
    pub version: Option<String>,
    /// Force re-download even if a verified archive exists
    pub force: bool,
    /// Override the shared downloads directory
    pub downloads_dir: Option<PathBuf>,
}

/// Result of fetching a recipe's sources
#[derive(Debug)]
pub struct FetchOutcome {
    /// Recipe name
    pub recipe: String,
    /// Version that was fetched
    pub version: String,
    /// Path of the downloaded archive
    pub archive: PathBuf,
    /// Extracted source directory
    pub source_dir: PathBuf,
    /// Whether the archive was downloaded (false = cache hit)
    pub downloaded: bool,
}

/// Fetch the sources for one recipe into `work_dir`
pub async fn fetch_sources(
    recipe: &RecipeDefinition,
    work_dir: &Path,
    options: &FetchOptions,
    progress: Option<ProgressCallback>,
) -> Result<FetchOutcome, FetchError> {
    let version = recipe.select_version(options.version.as_deref())?.to_string();
    let archive = recipe
        .source_for(&version)
        .ok_or_else(|| RecipeError::UnknownVersion {
            recipe: recipe.recipe.name.clone(),
            version: version.clone(),
            known: recipe.sources.keys().cloned().collect(),
        })?;

    let downloads_dir = options
        .downloads_dir
        .clone()
        .unwrap_or_else(|| PantryDirs::new().downloads_dir());
    std::fs::create_dir_all(&downloads_dir).map_err(|e| FetchError::IoError {
        path: downloads_dir.clone(),
        error: e.to_string(),
    })?;

    let filename = archive_filename(&archive.url, &recipe.recipe.name, &version);
    let dest = downloads_dir.join(filename);

    let downloaded = if !options.force
        && dest.exists()
        && verify_checksum(&dest, &archive.sha256).unwrap_or(false)
    {
        tracing::debug!("Reusing verified archive {}", dest.display());
        false
    } else {
        let manager = DownloadManager::new();
        manager
            .download_verified(&archive.url, &dest, &archive.sha256, progress)
            .await?;
        true
    };

    let source_dir = extract::unpack_renamed(&dest, work_dir, defaults::SOURCE_SUBFOLDER)?;

    Ok(FetchOutcome {
        recipe: recipe.recipe.name.clone(),
        version,
        archive: dest,
        source_dir,
        downloaded,
    })
}

/// File name for a downloaded archive: the URL's last path segment, with
/// a `<name>-<version>` fallback for opaque URLs.
fn archive_filename(url: &str, name: &str, version: &str) -> String {
    url.rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty() && segment.contains('.'))
        .map(ToString::to_string)
        .unwrap_or_else(|| format!("{name}-{version}.tar.gz"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_filename_from_url() {
        assert_eq!(
            archive_filename("https://example.com/a/b/pkg-1.0.tar.gz", "pkg", "1.0"),
            "pkg-1.0.tar.gz"
        );
    }

    #[test]
    fn test_archive_filename_fallback_for_opaque_url() {
        assert_eq!(
            archive_filename("https://example.com/download/", "pkg", "1.0"),
            "pkg-1.0.tar.gz"
        );
        assert_eq!(
            archive_filename("https://example.com/latest", "pkg", "2.1"),
            "pkg-2.1.tar.gz"
        );
    }
}
