//! CLI implementation for `pantry build`
//!
//! Configures and builds fetched sources for a recipe.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::cli::commands::resolve_work_dir;
use crate::cli::output;
use crate::core::builder::{build_recipe, BuildOptions};
use crate::core::options::parse_option_args;
use crate::core::recipe::RecipeDefinition;
use crate::core::settings::BuildSettings;

/// Execute the build command
pub fn execute(
    recipe_path: &Path,
    work_dir: Option<PathBuf>,
    settings: &BuildSettings,
    jobs: Option<usize>,
    option_args: &[String],
) -> Result<()> {
    let recipe = RecipeDefinition::load(recipe_path)
        .with_context(|| format!("Failed to load recipe from {}", recipe_path.display()))?;
    let work_dir = resolve_work_dir(recipe_path, work_dir);

    let option_values = parse_option_args(option_args)?;
    let options = BuildOptions {
        jobs,
        option_values,
    };

    let outcome = build_recipe(&recipe, &work_dir, settings, &options)
        .with_context(|| format!("Failed to build '{}'", recipe.recipe.name))?;

    if outcome.skipped {
        println!(
            "{} {} is prebuilt, nothing to build",
            output::status::INFO,
            recipe.recipe.name
        );
    } else {
        println!(
            "{} Built {} ({} definition(s))",
            output::status::SUCCESS,
            recipe.recipe.name,
            outcome.definitions.len()
        );
        println!("    build dir: {}", outcome.build_dir.display());
    }

    Ok(())
}
