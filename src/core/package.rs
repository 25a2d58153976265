//! Package step
//!
//! Copies the license file and the recipe's declared artifacts into the
//! package output layout, then fixes executable permissions across the
//! resulting tree.

use std::path::{Path, PathBuf};

use crate::config::defaults;
use crate::core::permissions::{fix_permissions, PermissionStats};
use crate::core::recipe::RecipeDefinition;
use crate::error::{PackageError, PantryError};
use crate::infra::filesystem;

/// Result of the package step
#[derive(Debug)]
pub struct PackageOutcome {
    /// Package output directory
    pub package_dir: PathBuf,
    /// Files placed by copy rules
    pub files_copied: usize,
    /// Whether a license file was copied
    pub license_copied: bool,
    /// Executable permission fix statistics
    pub permissions: PermissionStats,
}

/// Run the package step for a recipe inside `work_dir`
pub fn package_recipe(
    recipe: &RecipeDefinition,
    work_dir: &Path,
) -> Result<PackageOutcome, PantryError> {
    let package_dir = work_dir.join(defaults::PACKAGE_SUBFOLDER);
    filesystem::create_dir_all(&package_dir)?;

    let license_copied = copy_license(recipe, work_dir, &package_dir)?;

    let mut files_copied = 0;
    for rule in &recipe.package.copy {
        let src_dir = work_dir.join(&rule.src);
        let dst_dir = package_dir.join(&rule.dst);
        let copied = filesystem::copy_matching(&src_dir, &rule.pattern, &dst_dir)?;
        if copied == 0 {
            return Err(PackageError::EmptyCopyRule {
                recipe: recipe.recipe.name.clone(),
                src: format!("{}/{}", rule.src, rule.pattern),
                dst: rule.dst.clone(),
            }
            .into());
        }
        files_copied += copied;
    }

    let permissions = fix_permissions(&package_dir)?;

    tracing::info!(
        "Packaged '{}': {} file(s), {} made executable",
        recipe.recipe.name,
        files_copied,
        permissions.files_changed
    );

    Ok(PackageOutcome {
        package_dir,
        files_copied,
        license_copied,
        permissions,
    })
}

/// Copy the recipe's declared license file into `<package>/licenses/`
fn copy_license(
    recipe: &RecipeDefinition,
    work_dir: &Path,
    package_dir: &Path,
) -> Result<bool, PantryError> {
    let Some(license_file) = &recipe.recipe.license_file else {
        return Ok(false);
    };

    let src = work_dir
        .join(defaults::SOURCE_SUBFOLDER)
        .join(license_file);
    if !src.is_file() {
        return Err(PackageError::LicenseMissing {
            recipe: recipe.recipe.name.clone(),
            path: src,
        }
        .into());
    }

    let name = src
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "LICENSE".to_string());
    filesystem::copy_file(&src, &package_dir.join(defaults::LICENSES_DIR).join(name))?;
    Ok(true)
}
