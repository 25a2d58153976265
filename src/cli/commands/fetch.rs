//! CLI implementation for `pantry fetch`
//!
//! Downloads, verifies, and extracts a recipe's sources.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::cli::commands::resolve_work_dir;
use crate::cli::output;
use crate::core::fetch::{fetch_sources, FetchOptions};
use crate::core::recipe::RecipeDefinition;
use crate::infra::download::ProgressCallback;

/// Execute the fetch command
pub async fn execute(
    recipe_path: &Path,
    work_dir: Option<PathBuf>,
    version: Option<String>,
    force: bool,
    downloads_dir: Option<PathBuf>,
) -> Result<()> {
    let recipe = RecipeDefinition::load(recipe_path)
        .with_context(|| format!("Failed to load recipe from {}", recipe_path.display()))?;
    let work_dir = resolve_work_dir(recipe_path, work_dir);

    let bar = output::create_download_bar(0);
    let bar_for_callback = bar.clone();
    let progress: ProgressCallback = Box::new(move |downloaded, total| {
        if total > 0 && bar_for_callback.length() != Some(total) {
            bar_for_callback.set_length(total);
        }
        bar_for_callback.set_position(downloaded);
    });

    let options = FetchOptions {
        version,
        force,
        downloads_dir,
    };

    let result = fetch_sources(&recipe, &work_dir, &options, Some(progress)).await;
    bar.finish_and_clear();

    let outcome = result.with_context(|| {
        format!("Failed to fetch sources for '{}'", recipe.recipe.name)
    })?;

    if outcome.downloaded {
        println!(
            "{} Downloaded {} v{}",
            output::status::SUCCESS,
            outcome.recipe,
            outcome.version
        );
    } else {
        println!(
            "{} Reused verified archive for {} v{}",
            output::status::SUCCESS,
            outcome.recipe,
            outcome.version
        );
    }
    println!("    archive: {}", outcome.archive.display());
    println!("    sources: {}", outcome.source_dir.display());

    Ok(())
}
