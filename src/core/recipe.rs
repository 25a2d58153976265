//! Recipe definition handling
//!
//! A recipe is a declarative TOML description of how to obtain, build, and
//! package one third-party library or toolchain distribution: versioned
//! source archives, build options, artifact copy rules, and the environment
//! the packaged result exposes.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::error::RecipeError;

/// Complete recipe definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeDefinition {
    /// Recipe metadata
    pub recipe: RecipeMetadata,

    /// Source archives keyed by version
    pub sources: BTreeMap<String, SourceArchive>,

    /// Build options
    #[serde(default)]
    pub options: HashMap<String, OptionDefinition>,

    /// Build configuration (required for source recipes)
    #[serde(default)]
    pub build: Option<BuildConfig>,

    /// Packaging configuration
    #[serde(default)]
    pub package: PackageConfig,

    /// Environment the packaged result exposes
    #[serde(default)]
    pub env: EnvConfig,
}

/// Recipe metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeMetadata {
    /// Recipe name
    pub name: String,

    /// Recipe description
    pub description: String,

    /// License identifier
    #[serde(default)]
    pub license: Option<String>,

    /// License file inside the source tree, copied into the package
    #[serde(default)]
    pub license_file: Option<String>,

    /// Homepage URL
    #[serde(default)]
    pub homepage: Option<String>,

    /// Search topics
    #[serde(default)]
    pub topics: Vec<String>,

    /// Whether the sources are built or repackaged as-is
    #[serde(default)]
    pub kind: RecipeKind,

    /// Libraries the host dependency manager must provide.
    /// Declared only; pantry never resolves them.
    #[serde(default)]
    pub requires: Vec<String>,

    /// Supported target operating systems (empty = all)
    #[serde(default)]
    pub os: Vec<String>,

    /// Supported target architectures (empty = all)
    #[serde(default)]
    pub arch: Vec<String>,
}

/// Recipe kind
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecipeKind {
    /// Sources are configured and built with an external generator
    #[default]
    Source,
    /// A prebuilt distribution; the build step is a no-op
    Prebuilt,
}

/// One downloadable source archive
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceArchive {
    /// Archive URL
    pub url: String,

    /// SHA256 checksum of the archive
    pub sha256: String,
}

/// Option definition for configurable recipes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptionDefinition {
    /// Option type (bool, string, choice, number)
    #[serde(rename = "type")]
    pub option_type: String,

    /// Default value
    pub default: toml::Value,

    /// Description
    pub description: String,

    /// Valid choices (for choice type)
    #[serde(default)]
    pub choices: Vec<String>,

    /// Regex pattern (for string type)
    #[serde(default)]
    pub pattern: Option<String>,

    /// Allow empty string (for string type)
    #[serde(default = "default_true")]
    pub allow_empty: bool,

    /// Minimum value (for number type)
    #[serde(default)]
    pub min: Option<f64>,

    /// Maximum value (for number type)
    #[serde(default)]
    pub max: Option<f64>,
}

fn default_true() -> bool {
    true
}

/// Build configuration for source recipes
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BuildConfig {
    /// Option names forwarded to the generator as definitions.
    /// Empty means every declared option is forwarded.
    #[serde(default)]
    pub definitions: Vec<String>,

    /// Options that make the configuration invalid when enabled
    #[serde(default)]
    pub unsupported: Vec<UnsupportedRule>,

    /// Extra arguments passed to the configure invocation
    #[serde(default)]
    pub configure_args: Vec<String>,
}

/// An option the recipe cannot honor when enabled
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnsupportedRule {
    /// Option name
    pub option: String,

    /// Why the configuration is invalid
    pub reason: String,
}

/// Packaging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PackageConfig {
    /// Declarative artifact copy rules
    #[serde(default)]
    pub copy: Vec<CopyRule>,
}

/// Declarative artifact copy rule
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CopyRule {
    /// Source directory, relative to the work directory
    pub src: String,

    /// Filename pattern (`*` wildcard) matched within src
    pub pattern: String,

    /// Destination directory, relative to the package folder
    pub dst: String,
}

/// Environment declared by the recipe
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EnvConfig {
    /// Directories (relative to the package folder) prepended to PATH
    #[serde(default)]
    pub path: Vec<String>,

    /// Plain variables; values may use `${package_folder}` and `${triplet}`
    #[serde(default)]
    pub vars: BTreeMap<String, String>,
}

impl RecipeDefinition {
    /// Parse from TOML string
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load a recipe from `path`, which may be a recipe.toml file or a
    /// directory containing one.
    pub fn load(path: &Path) -> Result<Self, RecipeError> {
        let file = if path.is_dir() {
            path.join("recipe.toml")
        } else {
            path.to_path_buf()
        };

        let content = std::fs::read_to_string(&file)
            .map_err(|_| RecipeError::NotFound { path: file.clone() })?;

        let definition =
            Self::from_toml(&content).map_err(|e| RecipeError::ParseError(e.to_string()))?;
        definition.validate()?;
        Ok(definition)
    }

    /// Structural validation beyond what serde enforces
    pub fn validate(&self) -> Result<(), RecipeError> {
        if self.sources.is_empty() {
            return Err(RecipeError::NoVersions {
                recipe: self.recipe.name.clone(),
            });
        }
        if self.recipe.kind == RecipeKind::Source && self.build.is_none() {
            return Err(RecipeError::MissingBuildSection {
                recipe: self.recipe.name.clone(),
            });
        }
        Ok(())
    }

    /// Declared versions, newest first
    pub fn versions(&self) -> Vec<&str> {
        let mut versions: Vec<&str> = self.sources.keys().map(String::as_str).collect();
        versions.sort_by(|a, b| compare_versions(b, a));
        versions
    }

    /// Pick the requested version, or the newest one when none is given
    pub fn select_version(&self, requested: Option<&str>) -> Result<&str, RecipeError> {
        match requested {
            Some(version) => self
                .sources
                .get_key_value(version)
                .map(|(k, _)| k.as_str())
                .ok_or_else(|| RecipeError::UnknownVersion {
                    recipe: self.recipe.name.clone(),
                    version: version.to_string(),
                    known: self.sources.keys().cloned().collect(),
                }),
            None => self
                .versions()
                .first()
                .copied()
                .ok_or_else(|| RecipeError::NoVersions {
                    recipe: self.recipe.name.clone(),
                }),
        }
    }

    /// Source archive for a declared version
    pub fn source_for(&self, version: &str) -> Option<&SourceArchive> {
        self.sources.get(version)
    }
}

/// Order two version strings: semver ordering when both parse, falling
/// back to lexicographic for tag-style versions (`r21e`).
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    match (semver::Version::parse(a), semver::Version::parse(b)) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        _ => a.cmp(b),
    }
}
