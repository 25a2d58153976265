//! Archive extraction
//!
//! Unpacks downloaded source archives and renames the extracted top-level
//! directory to the conventional source subfolder.

use flate2::read::GzDecoder;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tar::Archive;
use tracing::debug;
use xz2::read::XzDecoder;

use crate::error::ExtractError;
use crate::infra::filesystem;

/// Compression formats recognized by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    Gzip,
    Xz,
    Zstd,
}

/// Detect the compression format from the archive file name
pub fn detect_compression(path: &Path) -> Result<CompressionFormat, ExtractError> {
    let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();

    if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
        Ok(CompressionFormat::Gzip)
    } else if name.ends_with(".tar.xz") {
        Ok(CompressionFormat::Xz)
    } else if name.ends_with(".tar.zst") {
        Ok(CompressionFormat::Zstd)
    } else {
        Err(ExtractError::UnsupportedFormat {
            path: path.to_path_buf(),
        })
    }
}

/// Open and decompress an archive
fn open_archive(path: &Path) -> Result<Archive<Box<dyn Read>>, ExtractError> {
    let file = File::open(path).map_err(|e| ExtractError::ReadArchive {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;

    let compression = detect_compression(path)?;

    let reader: Box<dyn Read> = match compression {
        CompressionFormat::Gzip => Box::new(GzDecoder::new(file)),
        CompressionFormat::Xz => Box::new(XzDecoder::new(file)),
        CompressionFormat::Zstd => {
            let decoder = zstd::Decoder::new(file).map_err(|e| ExtractError::ReadArchive {
                path: path.to_path_buf(),
                error: e.to_string(),
            })?;
            Box::new(decoder)
        }
    };

    Ok(Archive::new(reader))
}

/// Unpack `archive` into `dest_dir`
pub fn unpack(archive_path: &Path, dest_dir: &Path) -> Result<(), ExtractError> {
    filesystem::create_dir_all(dest_dir).map_err(|e| ExtractError::Unpack {
        path: archive_path.to_path_buf(),
        error: e.to_string(),
    })?;

    let mut archive = open_archive(archive_path)?;
    archive
        .unpack(dest_dir)
        .map_err(|e| ExtractError::Unpack {
            path: archive_path.to_path_buf(),
            error: e.to_string(),
        })?;

    debug!("Unpacked {} into {}", archive_path.display(), dest_dir.display());
    Ok(())
}

/// Unpack `archive` into `work_dir` and rename its single top-level
/// directory to `subfolder_name`, mirroring the conventional
/// `<name>-<version>` → `source` rename.
///
/// Returns the path of the renamed source directory.
pub fn unpack_renamed(
    archive_path: &Path,
    work_dir: &Path,
    subfolder_name: &str,
) -> Result<PathBuf, ExtractError> {
    let staging = work_dir.join(".extract");
    let _ = std::fs::remove_dir_all(&staging);

    unpack(archive_path, &staging)?;

    let top_level = single_top_level_dir(&staging).ok_or_else(|| ExtractError::NoTopLevelDir {
        path: archive_path.to_path_buf(),
    })?;

    let dest = work_dir.join(subfolder_name);
    let _ = std::fs::remove_dir_all(&dest);
    filesystem::rename(&top_level, &dest).map_err(|e| ExtractError::Unpack {
        path: archive_path.to_path_buf(),
        error: e.to_string(),
    })?;

    let _ = std::fs::remove_dir_all(&staging);
    Ok(dest)
}

/// The single directory entry of `dir`, if that is all it contains
fn single_top_level_dir(dir: &Path) -> Option<PathBuf> {
    let mut entries = std::fs::read_dir(dir).ok()?.filter_map(Result::ok);
    let first = entries.next()?;
    if entries.next().is_some() || !first.path().is_dir() {
        return None;
    }
    Some(first.path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use tempfile::TempDir;

    /// Build a small .tar.gz containing `pkg-1.0/` with the given files
    fn make_targz(dir: &Path, archive_name: &str, files: &[(&str, &[u8])]) -> PathBuf {
        let archive_path = dir.join(archive_name);
        let file = File::create(&archive_path).unwrap();
        let encoder = GzEncoder::new(file, Compression::default());
        let mut builder = tar::Builder::new(encoder);

        for (name, content) in files {
            let mut header = tar::Header::new_gnu();
            header.set_size(content.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder.append_data(&mut header, name, *content).unwrap();
        }

        builder.into_inner().unwrap().finish().unwrap();
        archive_path
    }

    #[test]
    fn test_detect_compression_by_extension() {
        assert_eq!(
            detect_compression(Path::new("a/pkg-1.0.tar.gz")).unwrap(),
            CompressionFormat::Gzip
        );
        assert_eq!(
            detect_compression(Path::new("pkg.tgz")).unwrap(),
            CompressionFormat::Gzip
        );
        assert_eq!(
            detect_compression(Path::new("pkg.tar.xz")).unwrap(),
            CompressionFormat::Xz
        );
        assert_eq!(
            detect_compression(Path::new("pkg.tar.zst")).unwrap(),
            CompressionFormat::Zstd
        );
    }

    #[test]
    fn test_detect_compression_rejects_unknown() {
        assert!(matches!(
            detect_compression(Path::new("pkg.zip")),
            Err(ExtractError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_unpack_renamed_moves_top_level_dir() {
        let dir = TempDir::new().unwrap();
        let archive = make_targz(
            dir.path(),
            "pkg-1.0.tar.gz",
            &[
                ("pkg-1.0/README", b"hello"),
                ("pkg-1.0/src/main.c", b"int main(void) { return 0; }"),
            ],
        );

        let source = unpack_renamed(&archive, dir.path(), "source").unwrap();

        assert_eq!(source, dir.path().join("source"));
        assert!(source.join("README").exists());
        assert!(source.join("src/main.c").exists());
        assert!(!dir.path().join("pkg-1.0").exists());
    }

    #[test]
    fn test_unpack_renamed_replaces_stale_source_dir() {
        let dir = TempDir::new().unwrap();
        let stale = dir.path().join("source");
        std::fs::create_dir_all(&stale).unwrap();
        std::fs::write(stale.join("old.txt"), "stale").unwrap();

        let archive = make_targz(dir.path(), "pkg-1.0.tar.gz", &[("pkg-1.0/new.txt", b"new")]);
        let source = unpack_renamed(&archive, dir.path(), "source").unwrap();

        assert!(source.join("new.txt").exists());
        assert!(!source.join("old.txt").exists());
    }

    #[test]
    fn test_unpack_renamed_rejects_flat_archive() {
        let dir = TempDir::new().unwrap();
        let archive = make_targz(
            dir.path(),
            "flat.tar.gz",
            &[("a.txt", b"a"), ("b.txt", b"b")],
        );

        assert!(matches!(
            unpack_renamed(&archive, dir.path(), "source"),
            Err(ExtractError::NoTopLevelDir { .. })
        ));
    }

    #[test]
    fn test_unpack_missing_archive_fails() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            unpack(&dir.path().join("missing.tar.gz"), dir.path()),
            Err(ExtractError::ReadArchive { .. })
        ));
    }
}
