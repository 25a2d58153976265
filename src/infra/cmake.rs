//! CMake invocation
//!
//! Thin wrapper around the external CMake generator: configure a source
//! tree into a build folder with definition flags, then drive the build.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::BuildError;

/// CMake wrapper bound to one source/build folder pair
#[derive(Debug)]
pub struct Cmake {
    /// Path to the cmake binary
    cmake_path: PathBuf,
    /// Source tree
    source_dir: PathBuf,
    /// Out-of-tree build folder
    build_dir: PathBuf,
}

impl Cmake {
    /// Locate cmake on PATH and bind it to the given folders
    pub fn locate(source_dir: &Path, build_dir: &Path) -> Result<Self, BuildError> {
        let cmake_path = which::which("cmake").map_err(|_| BuildError::ToolNotFound {
            tool: "cmake".to_string(),
        })?;
        Ok(Self {
            cmake_path,
            source_dir: source_dir.to_path_buf(),
            build_dir: build_dir.to_path_buf(),
        })
    }

    /// Create a wrapper for a known cmake binary (used by tests)
    pub fn with_binary(cmake_path: PathBuf, source_dir: &Path, build_dir: &Path) -> Self {
        Self {
            cmake_path,
            source_dir: source_dir.to_path_buf(),
            build_dir: build_dir.to_path_buf(),
        }
    }

    /// Arguments for the configure invocation
    pub fn configure_args(&self, definitions: &[String], extra_args: &[String]) -> Vec<String> {
        let mut args = vec![
            "-S".to_string(),
            self.source_dir.display().to_string(),
            "-B".to_string(),
            self.build_dir.display().to_string(),
        ];
        args.extend(definitions.iter().cloned());
        args.extend(extra_args.iter().cloned());
        args
    }

    /// Arguments for the build invocation
    pub fn build_args(&self, jobs: usize) -> Vec<String> {
        vec![
            "--build".to_string(),
            self.build_dir.display().to_string(),
            "--parallel".to_string(),
            jobs.to_string(),
        ]
    }

    /// Run the configure step
    pub fn configure(
        &self,
        recipe_name: &str,
        definitions: &[String],
        extra_args: &[String],
    ) -> Result<(), BuildError> {
        self.run(recipe_name, &self.configure_args(definitions, extra_args))
    }

    /// Run the build step
    pub fn build(&self, recipe_name: &str, jobs: usize) -> Result<(), BuildError> {
        self.run(recipe_name, &self.build_args(jobs))
    }

    fn run(&self, recipe_name: &str, args: &[String]) -> Result<(), BuildError> {
        tracing::debug!("Running {} {}", self.cmake_path.display(), args.join(" "));

        let status = Command::new(&self.cmake_path)
            .args(args)
            .status()
            .map_err(|e| BuildError::BuildFailed {
                recipe: recipe_name.to_string(),
                error: e.to_string(),
            })?;

        if !status.success() {
            return Err(BuildError::BuildFailed {
                recipe: recipe_name.to_string(),
                error: format!("cmake exited with {status}"),
            });
        }
        Ok(())
    }
}

/// Check whether cmake is installed on the system
pub fn is_cmake_available() -> bool {
    which::which("cmake").is_ok()
}
