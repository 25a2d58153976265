//! CLI implementation for `pantry package`
//!
//! Copies artifacts into the package layout and fixes executable
//! permissions.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::cli::commands::resolve_work_dir;
use crate::cli::output;
use crate::core::package::package_recipe;
use crate::core::recipe::RecipeDefinition;

/// Execute the package command
pub fn execute(recipe_path: &Path, work_dir: Option<PathBuf>) -> Result<()> {
    let recipe = RecipeDefinition::load(recipe_path)
        .with_context(|| format!("Failed to load recipe from {}", recipe_path.display()))?;
    let work_dir = resolve_work_dir(recipe_path, work_dir);

    let outcome = package_recipe(&recipe, &work_dir)
        .with_context(|| format!("Failed to package '{}'", recipe.recipe.name))?;

    println!(
        "{} Packaged {} into {}",
        output::status::SUCCESS,
        recipe.recipe.name,
        outcome.package_dir.display()
    );
    println!("    files copied: {}", outcome.files_copied);
    if outcome.license_copied {
        println!("    license: copied");
    }

    let perms = &outcome.permissions;
    println!(
        "    executable fixes: {} ({} script(s), {} ELF, {} Mach-O)",
        perms.files_changed, perms.scripts, perms.elf_binaries, perms.mach_o_binaries
    );
    if !perms.failed.is_empty() {
        println!(
            "{} Failed to chmod {} file(s):",
            output::status::WARNING,
            perms.failed.len()
        );
        for (path, error) in &perms.failed {
            println!("    {}: {error}", path.display());
        }
    }

    Ok(())
}
