//! Executable permission fixing
//!
//! Archives do not always preserve executable bits, so after the package
//! step every file in the package folder is classified by its leading
//! bytes and recognized executable formats (shell scripts, ELF, Mach-O)
//! get the executable bit re-granted.

use std::io::Read;
use std::path::{Path, PathBuf};

use crate::config::defaults::SIGNATURE_LEN;
use crate::error::PermissionsError;

/// File format classification derived from a file's leading bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Interpreter script starting with `#!`
    ShellScript,
    /// ELF binary
    Elf,
    /// Mach-O binary
    MachO(MachOVariant),
}

/// Mach-O header variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachOVariant {
    /// Universal (fat) binary, big-endian header
    FatBig,
    /// Universal (fat) binary, little-endian header
    FatLittle,
    /// 64-bit binary, big-endian header
    Bits64Big,
    /// 64-bit binary, little-endian header
    Bits64Little,
    /// 32-bit binary, big-endian header
    Bits32Big,
    /// 32-bit binary, little-endian header
    Bits32Little,
}

impl FileKind {
    /// Format name used in log lines
    pub fn name(self) -> &'static str {
        match self {
            Self::ShellScript => "script",
            Self::Elf => "ELF",
            Self::MachO(_) => "Mach-O",
        }
    }
}

/// Shebang prefix (`#!`)
const SHEBANG: [u8; 2] = [0x23, 0x21];

/// Exact 4-byte magic signatures, checked in order
const SIGNATURES: &[([u8; 4], FileKind)] = &[
    ([0x7f, b'E', b'L', b'F'], FileKind::Elf),
    ([0xca, 0xfe, 0xba, 0xbe], FileKind::MachO(MachOVariant::FatBig)),
    ([0xbe, 0xba, 0xfe, 0xca], FileKind::MachO(MachOVariant::FatLittle)),
    ([0xfe, 0xed, 0xfa, 0xcf], FileKind::MachO(MachOVariant::Bits64Big)),
    ([0xcf, 0xfa, 0xed, 0xfe], FileKind::MachO(MachOVariant::Bits64Little)),
    ([0xfe, 0xef, 0xfa, 0xce], FileKind::MachO(MachOVariant::Bits32Big)),
    ([0xce, 0xfa, 0xed, 0xfe], FileKind::MachO(MachOVariant::Bits32Little)),
];

/// Classify a file signature.
///
/// Returns `None` for anything that is not a recognized executable format.
pub fn classify_signature(sig: &[u8; SIGNATURE_LEN]) -> Option<FileKind> {
    if sig[..2] == SHEBANG {
        return Some(FileKind::ShellScript);
    }
    SIGNATURES
        .iter()
        .find(|(magic, _)| sig == magic)
        .map(|&(_, kind)| kind)
}

/// Classify a file by reading its first 4 bytes.
///
/// Unreadable files and files shorter than 4 bytes classify as `None`.
/// The file handle is scoped to this call.
pub fn classify_file(path: &Path) -> Option<FileKind> {
    let mut file = std::fs::File::open(path).ok()?;
    let mut sig = [0u8; SIGNATURE_LEN];
    file.read_exact(&mut sig).ok()?;
    classify_signature(&sig)
}

/// Statistics from a permission-fix pass
#[derive(Debug, Default, Clone)]
pub struct PermissionStats {
    /// Regular files visited
    pub files_scanned: usize,
    /// Files granted the executable bit
    pub files_changed: usize,
    /// Shell scripts found
    pub scripts: usize,
    /// ELF binaries found
    pub elf_binaries: usize,
    /// Mach-O binaries found
    pub mach_o_binaries: usize,
    /// Files whose chmod failed, with the error message
    pub failed: Vec<(PathBuf, String)>,
}

/// Grant the executable bit for owner, group, and other, preserving all
/// other permission bits.
#[cfg(unix)]
fn grant_execute(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = std::fs::metadata(path)?.permissions();
    perms.set_mode(perms.mode() | 0o111);
    std::fs::set_permissions(path, perms)
}

/// Walk `root` and grant the executable bit to every regular file whose
/// signature identifies an executable format.
///
/// Visit order is unspecified; each file is classified independently.
/// Unreadable and short files are skipped. A failed chmod is recorded in
/// the stats and the walk continues.
#[cfg(unix)]
pub fn fix_permissions(root: &Path) -> Result<PermissionStats, PermissionsError> {
    if !root.is_dir() {
        return Err(PermissionsError::InvalidRoot {
            path: root.to_path_buf(),
        });
    }

    let mut stats = PermissionStats::default();

    for entry in walkdir::WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        stats.files_scanned += 1;

        let Some(kind) = classify_file(path) else {
            continue;
        };

        match kind {
            FileKind::ShellScript => stats.scripts += 1,
            FileKind::Elf => stats.elf_binaries += 1,
            FileKind::MachO(_) => stats.mach_o_binaries += 1,
        }

        match grant_execute(path) {
            Ok(()) => {
                stats.files_changed += 1;
                tracing::info!("chmod on {} file: \"{}\"", kind.name(), path.display());
            }
            Err(e) => {
                tracing::warn!("Failed to chmod {}: {}", path.display(), e);
                stats.failed.push((path.to_path_buf(), e.to_string()));
            }
        }
    }

    Ok(stats)
}

/// Executable bits do not exist on this permission model; the whole pass
/// is a successful no-op.
#[cfg(not(unix))]
pub fn fix_permissions(_root: &Path) -> Result<PermissionStats, PermissionsError> {
    Ok(PermissionStats::default())
}
