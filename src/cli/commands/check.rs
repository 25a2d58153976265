//! CLI implementation for `pantry check`
//!
//! Validates a recipe and the selected configuration without fetching or
//! building anything.

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::output;
use crate::core::options::{
    check_configuration, parse_option_args, resolve_options, OptionSource,
};
use crate::core::recipe::RecipeDefinition;
use crate::core::settings::BuildSettings;

/// Execute the check command
pub fn execute(recipe_path: &Path, settings: &BuildSettings, option_args: &[String]) -> Result<()> {
    let recipe = RecipeDefinition::load(recipe_path)
        .with_context(|| format!("Failed to load recipe from {}", recipe_path.display()))?;

    settings.check_supported(&recipe.recipe.name, &recipe.recipe.os, &recipe.recipe.arch)?;

    let cli_values = parse_option_args(option_args)?;
    let resolved = resolve_options(&recipe, &cli_values)?;
    check_configuration(&recipe, &resolved)?;

    println!(
        "{} Recipe '{}' is valid for {}/{} ({})",
        output::status::SUCCESS,
        recipe.recipe.name,
        settings.os.as_str(),
        settings.arch.as_str(),
        settings.build_type.as_str()
    );

    if !resolved.is_empty() {
        println!("  Options:");
        for (name, option) in &resolved {
            let origin = match option.source {
                OptionSource::Cli => "cli",
                OptionSource::Default => "default",
            };
            println!("    {name} = {} ({origin})", option.value);
        }
    }

    if !recipe.recipe.requires.is_empty() {
        println!("  Requires (resolved by the host):");
        for requirement in &recipe.recipe.requires {
            println!("    {requirement}");
        }
    }

    Ok(())
}
