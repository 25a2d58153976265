//! Build step orchestration
//!
//! Validates the configuration, translates options into generator
//! definitions, and drives the CMake configure and build invocations.
//! Prebuilt recipes skip the whole step.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::defaults;
use crate::core::options::{check_configuration, resolve_options, to_definitions};
use crate::core::recipe::{RecipeDefinition, RecipeKind};
use crate::core::settings::BuildSettings;
use crate::error::{BuildError, PantryError};
use crate::infra::cmake::Cmake;

/// Options for the build step
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Parallel jobs; available CPUs when absent
    pub jobs: Option<usize>,
    /// CLI option values (already parsed from `-o name=value`)
    pub option_values: HashMap<String, toml::Value>,
}

/// Result of the build step
#[derive(Debug)]
pub struct BuildOutcome {
    /// Whether the step was skipped (prebuilt recipe)
    pub skipped: bool,
    /// Definitions forwarded to the generator
    pub definitions: Vec<String>,
    /// Build folder (empty for skipped builds)
    pub build_dir: PathBuf,
}

/// Run the build step for a recipe inside `work_dir`
pub fn build_recipe(
    recipe: &RecipeDefinition,
    work_dir: &Path,
    settings: &BuildSettings,
    options: &BuildOptions,
) -> Result<BuildOutcome, PantryError> {
    settings.check_supported(&recipe.recipe.name, &recipe.recipe.os, &recipe.recipe.arch)?;

    let resolved = resolve_options(recipe, &options.option_values)?;
    check_configuration(recipe, &resolved)?;

    if recipe.recipe.kind == RecipeKind::Prebuilt {
        tracing::info!(
            "Recipe '{}' is a prebuilt distribution, nothing to build",
            recipe.recipe.name
        );
        return Ok(BuildOutcome {
            skipped: true,
            definitions: vec![],
            build_dir: PathBuf::new(),
        });
    }

    let source_dir = work_dir.join(defaults::SOURCE_SUBFOLDER);
    if !source_dir.is_dir() {
        return Err(BuildError::SourcesMissing {
            recipe: recipe.recipe.name.clone(),
            path: source_dir,
        }
        .into());
    }

    let mut definitions = to_definitions(recipe, &resolved);
    definitions.push(format!(
        "-DCMAKE_BUILD_TYPE={}",
        settings.build_type.as_str()
    ));

    let extra_args = recipe
        .build
        .as_ref()
        .map(|b| b.configure_args.clone())
        .unwrap_or_default();

    let build_dir = work_dir.join(defaults::BUILD_SUBFOLDER);
    let cmake = Cmake::locate(&source_dir, &build_dir)?;
    cmake.configure(&recipe.recipe.name, &definitions, &extra_args)?;

    let jobs = options.jobs.unwrap_or_else(num_cpus::get);
    cmake.build(&recipe.recipe.name, jobs)?;

    Ok(BuildOutcome {
        skipped: false,
        definitions,
        build_dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn prebuilt_recipe() -> RecipeDefinition {
        RecipeDefinition::from_toml(
            r#"
[recipe]
name = "toolchain"
description = "Prebuilt toolchain"
kind = "prebuilt"

[sources."r21e"]
url = "https://example.com/toolchain-r21e.tar.xz"
sha256 = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
"#,
        )
        .unwrap()
    }

    fn source_recipe() -> RecipeDefinition {
        RecipeDefinition::from_toml(
            r#"
[recipe]
name = "nlplib"
description = "Source library"
os = ["linux", "macos"]

[sources."4.1"]
url = "https://example.com/nlplib-4.1.tar.gz"
sha256 = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"

[options.java_api]
type = "bool"
default = false
description = "Java bindings"

[build]
unsupported = [{ option = "java_api", reason = "requires SWIG" }]
"#,
        )
        .unwrap()
    }

    fn linux_settings() -> BuildSettings {
        BuildSettings::parse("linux", "x86_64", "Release").unwrap()
    }

    #[test]
    fn test_prebuilt_recipe_skips_build() {
        let dir = TempDir::new().unwrap();
        let outcome = build_recipe(
            &prebuilt_recipe(),
            dir.path(),
            &linux_settings(),
            &BuildOptions::default(),
        )
        .unwrap();

        assert!(outcome.skipped);
        assert!(outcome.definitions.is_empty());
    }

    #[test]
    fn test_unsupported_settings_are_rejected() {
        let dir = TempDir::new().unwrap();
        let settings = BuildSettings::parse("windows", "x86_64", "Release").unwrap();

        let err = build_recipe(
            &source_recipe(),
            dir.path(),
            &settings,
            &BuildOptions::default(),
        )
        .unwrap_err();

        assert!(matches!(err, PantryError::Settings(_)));
    }

    #[test]
    fn test_invalid_configuration_is_rejected_before_building() {
        let dir = TempDir::new().unwrap();
        let mut option_values = HashMap::new();
        option_values.insert("java_api".to_string(), toml::Value::Boolean(true));

        let err = build_recipe(
            &source_recipe(),
            dir.path(),
            &linux_settings(),
            &BuildOptions {
                jobs: None,
                option_values,
            },
        )
        .unwrap_err();

        assert!(matches!(err, PantryError::Option(_)));
    }

    #[test]
    fn test_missing_sources_are_reported() {
        let dir = TempDir::new().unwrap();
        let err = build_recipe(
            &source_recipe(),
            dir.path(),
            &linux_settings(),
            &BuildOptions::default(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            PantryError::Build(BuildError::SourcesMissing { .. })
        ));
    }
}
