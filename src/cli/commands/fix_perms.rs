//! CLI implementation for `pantry fix-perms`
//!
//! Runs the executable classifier over an arbitrary directory tree.

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::output;
use crate::core::permissions::fix_permissions;

/// Execute the fix-perms command
pub fn execute(path: &Path) -> Result<()> {
    let stats = fix_permissions(path)
        .with_context(|| format!("Failed to fix permissions under {}", path.display()))?;

    println!(
        "{} Scanned {} file(s), {} made executable",
        output::status::SUCCESS,
        stats.files_scanned,
        stats.files_changed
    );
    println!(
        "    {} script(s), {} ELF, {} Mach-O",
        stats.scripts, stats.elf_binaries, stats.mach_o_binaries
    );

    if !stats.failed.is_empty() {
        println!(
            "{} Failed to chmod {} file(s):",
            output::status::WARNING,
            stats.failed.len()
        );
        for (file, error) in &stats.failed {
            println!("    {}: {error}", file.display());
        }
    }

    Ok(())
}
