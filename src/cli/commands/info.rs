//! CLI implementation for `pantry info`
//!
//! Shows recipe metadata, declared versions, and options.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;

use crate::core::recipe::{RecipeDefinition, RecipeKind};

/// Execute the info command
pub fn execute(recipe_path: &Path, json_output: bool) -> Result<()> {
    let recipe = RecipeDefinition::load(recipe_path)
        .with_context(|| format!("Failed to load recipe from {}", recipe_path.display()))?;

    if json_output {
        let mut option_names: Vec<&String> = recipe.options.keys().collect();
        option_names.sort();
        let value = json!({
            "name": recipe.recipe.name,
            "description": recipe.recipe.description,
            "license": recipe.recipe.license,
            "homepage": recipe.recipe.homepage,
            "kind": match recipe.recipe.kind {
                RecipeKind::Source => "source",
                RecipeKind::Prebuilt => "prebuilt",
            },
            "versions": recipe.versions(),
            "requires": recipe.recipe.requires,
            "options": option_names,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{} - {}", recipe.recipe.name, recipe.recipe.description);
    if let Some(license) = &recipe.recipe.license {
        println!("  license: {license}");
    }
    if let Some(homepage) = &recipe.recipe.homepage {
        println!("  homepage: {homepage}");
    }
    println!(
        "  kind: {}",
        match recipe.recipe.kind {
            RecipeKind::Source => "source",
            RecipeKind::Prebuilt => "prebuilt",
        }
    );
    println!("  versions: {}", recipe.versions().join(", "));

    if !recipe.recipe.requires.is_empty() {
        println!("  requires: {}", recipe.recipe.requires.join(", "));
    }

    if !recipe.options.is_empty() {
        println!("  options:");
        let mut names: Vec<_> = recipe.options.keys().collect();
        names.sort();
        for name in names {
            let option = &recipe.options[name];
            println!(
                "    {name} ({}) = {} - {}",
                option.option_type, option.default, option.description
            );
        }
    }

    Ok(())
}
