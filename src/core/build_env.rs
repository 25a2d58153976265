//! Toolchain environment assembly
//!
//! Builds the set of environment variables a packaged recipe exposes to its
//! consumers: PATH prepends plus plain variables, with placeholders from
//! the recipe expanded against the actual package folder and target
//! settings.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::core::recipe::RecipeDefinition;
use crate::core::settings::BuildSettings;
use crate::core::triplet;

/// Assembled environment for a packaged recipe.
///
/// Variables are kept in a sorted map so rendering is deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolchainEnv {
    /// Directories prepended to PATH, in declaration order
    path_prepends: Vec<PathBuf>,
    /// Plain variables
    vars: BTreeMap<String, String>,
}

impl ToolchainEnv {
    /// Assemble the environment a recipe declares, expanding
    /// `${package_folder}`, `${triplet}`, and `${driver}` placeholders.
    pub fn from_recipe(
        recipe: &RecipeDefinition,
        settings: &BuildSettings,
        package_folder: &Path,
        api_level: u32,
    ) -> Self {
        let chost = triplet::chost(settings);
        let driver = triplet::driver(settings, api_level);
        let folder = package_folder.display().to_string();

        let expand = |value: &str| {
            value
                .replace("${package_folder}", &folder)
                .replace("${triplet}", &chost)
                .replace("${driver}", &driver)
        };

        let path_prepends = recipe
            .env
            .path
            .iter()
            .map(|entry| package_folder.join(expand(entry)))
            .collect();

        let vars = recipe
            .env
            .vars
            .iter()
            .map(|(name, value)| (name.clone(), expand(value)))
            .collect();

        Self {
            path_prepends,
            vars,
        }
    }

    /// Add or override a variable
    #[must_use]
    pub fn with_var(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }

    /// Directories to prepend to PATH
    pub fn path_prepends(&self) -> &[PathBuf] {
        &self.path_prepends
    }

    /// Plain variables in sorted order
    pub fn vars(&self) -> &BTreeMap<String, String> {
        &self.vars
    }

    /// Flatten to a plain variable map. PATH prepends are joined with the
    /// platform separator and stored under `PATH` with a trailing
    /// reference to the inherited value.
    pub fn to_env_map(&self) -> BTreeMap<String, String> {
        let mut env = self.vars.clone();
        if !self.path_prepends.is_empty() {
            let sep = if cfg!(windows) { ';' } else { ':' };
            let joined = self
                .path_prepends
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(&sep.to_string());
            env.insert("PATH".to_string(), format!("{joined}{sep}$PATH"));
        }
        env
    }

    /// Render POSIX `export` lines, PATH first
    pub fn render_exports(&self) -> String {
        let mut lines = Vec::new();
        let env = self.to_env_map();
        if let Some(path) = env.get("PATH") {
            lines.push(format!("export PATH=\"{path}\""));
        }
        for (name, value) in &env {
            if name != "PATH" {
                lines.push(format!("export {name}=\"{value}\""));
            }
        }
        lines.join("\n")
    }

    /// Check the assembled environment is sane
    pub fn validate(&self) -> Result<(), BuildEnvError> {
        for name in self.vars.keys() {
            if name.is_empty() {
                return Err(BuildEnvError::EmptyName);
            }
            if name.contains(['=', ' ']) {
                return Err(BuildEnvError::InvalidName { name: name.clone() });
            }
        }
        Ok(())
    }
}

/// Environment assembly errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildEnvError {
    /// Variable with an empty name
    EmptyName,
    /// Variable name with characters the shell cannot accept
    InvalidName { name: String },
}

impl std::fmt::Display for BuildEnvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Environment variable with empty name"),
            Self::InvalidName { name } => {
                write!(f, "Invalid environment variable name: '{name}'")
            }
        }
    }
}

impl std::error::Error for BuildEnvError {}
