//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::path::PathBuf;
use tempfile::TempDir;

/// Test workspace context
///
/// Creates a temporary directory for a recipe work dir and provides
/// utilities for setting up test scenarios.
pub struct TestWorkspace {
    /// Temporary directory for the workspace
    pub dir: TempDir,
}

impl TestWorkspace {
    /// Create a new workspace in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the workspace directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a text file in the workspace
    pub fn create_file(&self, name: &str, content: &str) {
        self.create_binary(name, content.as_bytes());
    }

    /// Create a binary file in the workspace
    pub fn create_binary(&self, name: &str, content: &[u8]) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Check if a file exists in the workspace
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Write a recipe.toml into the workspace and return its directory
    pub fn with_recipe(&self, content: &str) -> PathBuf {
        self.create_file("recipe.toml", content);
        self.path()
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Sample prebuilt recipe TOML for testing
#[allow(dead_code)]
pub const SAMPLE_PREBUILT_RECIPE: &str = r#"
[recipe]
name = "test-toolchain"
description = "A prebuilt test toolchain"
kind = "prebuilt"

[sources."r21e"]
url = "https://example.com/test-toolchain-r21e.tar.xz"
sha256 = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"

[env]
path = ["bin"]

[env.vars]
TOOLCHAIN_ROOT = "${package_folder}"
CHOST = "${triplet}"
CC = "${driver}-clang"
"#;

/// Sample source recipe TOML for testing
#[allow(dead_code)]
pub const SAMPLE_SOURCE_RECIPE: &str = r#"
[recipe]
name = "test-lib"
description = "A source library"
license = "MIT"

[sources."1.0.0"]
url = "https://example.com/test-lib-1.0.0.tar.gz"
sha256 = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"

[options.traces]
type = "bool"
default = false
description = "Enable tracing"

[options.java_api]
type = "bool"
default = false
description = "Java bindings"

[build]
definitions = ["traces"]
unsupported = [{ option = "java_api", reason = "requires SWIG" }]
"#;
