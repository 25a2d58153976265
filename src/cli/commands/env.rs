//! CLI implementation for `pantry env`
//!
//! Renders the environment a packaged recipe exposes for the selected
//! target settings.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::cli::commands::resolve_work_dir;
use crate::config::defaults;
use crate::core::build_env::ToolchainEnv;
use crate::core::recipe::RecipeDefinition;
use crate::core::settings::BuildSettings;

/// Execute the env command
pub fn execute(
    recipe_path: &Path,
    settings: &BuildSettings,
    api_level: u32,
    package_folder: Option<PathBuf>,
    work_dir: Option<PathBuf>,
    export: bool,
    json_output: bool,
) -> Result<()> {
    let recipe = RecipeDefinition::load(recipe_path)
        .with_context(|| format!("Failed to load recipe from {}", recipe_path.display()))?;

    let package_folder = package_folder.unwrap_or_else(|| {
        resolve_work_dir(recipe_path, work_dir).join(defaults::PACKAGE_SUBFOLDER)
    });

    let env = ToolchainEnv::from_recipe(&recipe, settings, &package_folder, api_level);
    env.validate()
        .with_context(|| format!("Recipe '{}' declares a broken [env]", recipe.recipe.name))?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&env.to_env_map())?);
    } else if export {
        let rendered = env.render_exports();
        if !rendered.is_empty() {
            println!("{rendered}");
        }
    } else {
        for (name, value) in env.to_env_map() {
            println!("{name}={value}");
        }
    }

    Ok(())
}
