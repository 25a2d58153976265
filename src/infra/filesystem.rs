//! Filesystem operations
//!
//! Handles file and directory operations.

use std::path::Path;

use crate::error::FilesystemError;

/// Create a directory and all parent directories
pub fn create_dir_all(path: &Path) -> Result<(), FilesystemError> {
    std::fs::create_dir_all(path).map_err(|e| FilesystemError::CreateDir {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Remove a directory and all its contents
pub fn remove_dir_all(path: &Path) -> Result<(), FilesystemError> {
    if path.exists() {
        std::fs::remove_dir_all(path).map_err(|e| FilesystemError::RemoveDir {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
    }
    Ok(())
}

/// Write content to a file
pub fn write_file(path: &Path, content: &str) -> Result<(), FilesystemError> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }
    std::fs::write(path, content).map_err(|e| FilesystemError::WriteFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Read content from a file
pub fn read_file(path: &Path) -> Result<String, FilesystemError> {
    std::fs::read_to_string(path).map_err(|e| FilesystemError::ReadFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Rename a file or directory
pub fn rename(from: &Path, to: &Path) -> Result<(), FilesystemError> {
    std::fs::rename(from, to).map_err(|e| FilesystemError::Rename {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        error: e.to_string(),
    })
}

/// Copy one file, creating the destination's parent directories
pub fn copy_file(from: &Path, to: &Path) -> Result<(), FilesystemError> {
    if let Some(parent) = to.parent() {
        create_dir_all(parent)?;
    }
    std::fs::copy(from, to).map_err(|e| FilesystemError::CopyFile {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        error: e.to_string(),
    })?;
    Ok(())
}

/// Copy every file under `src_dir` whose file name matches `pattern`
/// (`*` wildcard) into `dst_dir`, preserving relative subpaths.
///
/// Returns the number of files copied.
pub fn copy_matching(
    src_dir: &Path,
    pattern: &str,
    dst_dir: &Path,
) -> Result<usize, FilesystemError> {
    let regex = pattern_to_regex(pattern);
    let mut copied = 0;

    for entry in walkdir::WalkDir::new(src_dir)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
    {
        let name = entry.file_name().to_string_lossy();
        if !regex.is_match(&name) {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(src_dir)
            .unwrap_or_else(|_| entry.path());
        copy_file(entry.path(), &dst_dir.join(relative))?;
        copied += 1;
    }

    Ok(copied)
}

/// Translate a `*`-wildcard pattern into an anchored regex
fn pattern_to_regex(pattern: &str) -> regex::Regex {
    let escaped = regex::escape(pattern).replace("\\*", ".*");
    // The escaped pattern is always a valid regex.
    regex::Regex::new(&format!("^{escaped}$")).expect("wildcard pattern produced invalid regex")
}
