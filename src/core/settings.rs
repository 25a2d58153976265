//! Build settings
//!
//! One immutable value holding the target configuration for a run. Every
//! step receives it explicitly; nothing reads configuration from process
//! globals.

use serde::Serialize;

use crate::error::SettingsError;

/// Target operating system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetOs {
    Linux,
    Macos,
    Windows,
    Android,
}

impl TargetOs {
    /// All recognized names
    pub const ALL: &'static [&'static str] = &["linux", "macos", "windows", "android"];

    /// Parse a CLI-provided os name
    pub fn parse(value: &str) -> Result<Self, SettingsError> {
        match value.to_ascii_lowercase().as_str() {
            "linux" => Ok(Self::Linux),
            "macos" => Ok(Self::Macos),
            "windows" => Ok(Self::Windows),
            "android" => Ok(Self::Android),
            _ => Err(SettingsError::UnknownOs {
                os: value.to_string(),
                known: Self::ALL.iter().map(|s| (*s).to_string()).collect(),
            }),
        }
    }

    /// Canonical lowercase name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::Macos => "macos",
            Self::Windows => "windows",
            Self::Android => "android",
        }
    }
}

/// Target architecture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetArch {
    X86,
    X86_64,
    Armv7,
    Armv8,
}

impl TargetArch {
    /// All recognized names
    pub const ALL: &'static [&'static str] = &["x86", "x86_64", "armv7", "armv8"];

    /// Parse a CLI-provided arch name
    pub fn parse(value: &str) -> Result<Self, SettingsError> {
        match value.to_ascii_lowercase().as_str() {
            "x86" => Ok(Self::X86),
            "x86_64" | "amd64" => Ok(Self::X86_64),
            "armv7" | "arm" => Ok(Self::Armv7),
            "armv8" | "arm64" | "aarch64" => Ok(Self::Armv8),
            _ => Err(SettingsError::UnknownArch {
                arch: value.to_string(),
                known: Self::ALL.iter().map(|s| (*s).to_string()).collect(),
            }),
        }
    }

    /// Canonical lowercase name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::X86 => "x86",
            Self::X86_64 => "x86_64",
            Self::Armv7 => "armv7",
            Self::Armv8 => "armv8",
        }
    }
}

/// Build type forwarded to the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BuildType {
    Release,
    Debug,
}

impl BuildType {
    /// Parse a CLI-provided build type
    pub fn parse(value: &str) -> Result<Self, SettingsError> {
        match value.to_ascii_lowercase().as_str() {
            "release" => Ok(Self::Release),
            "debug" => Ok(Self::Debug),
            _ => Err(SettingsError::UnknownBuildType {
                build_type: value.to_string(),
            }),
        }
    }

    /// Name in the generator's spelling
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Release => "Release",
            Self::Debug => "Debug",
        }
    }
}

/// Immutable target configuration for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuildSettings {
    /// Target operating system
    pub os: TargetOs,
    /// Target architecture
    pub arch: TargetArch,
    /// Build type
    pub build_type: BuildType,
}

impl BuildSettings {
    /// Parse settings from CLI strings
    pub fn parse(os: &str, arch: &str, build_type: &str) -> Result<Self, SettingsError> {
        Ok(Self {
            os: TargetOs::parse(os)?,
            arch: TargetArch::parse(arch)?,
            build_type: BuildType::parse(build_type)?,
        })
    }

    /// Settings for the machine pantry runs on, release build
    pub fn host() -> Self {
        let os = if cfg!(target_os = "macos") {
            TargetOs::Macos
        } else if cfg!(target_os = "windows") {
            TargetOs::Windows
        } else {
            TargetOs::Linux
        };
        let arch = if cfg!(target_arch = "x86_64") {
            TargetArch::X86_64
        } else if cfg!(target_arch = "aarch64") {
            TargetArch::Armv8
        } else if cfg!(target_arch = "x86") {
            TargetArch::X86
        } else {
            TargetArch::Armv7
        };
        Self {
            os,
            arch,
            build_type: BuildType::Release,
        }
    }

    /// Check the settings against a recipe's declared support sets
    /// (empty set = everything supported).
    pub fn check_supported(
        &self,
        recipe_name: &str,
        supported_os: &[String],
        supported_arch: &[String],
    ) -> Result<(), SettingsError> {
        if !supported_os.is_empty() && !supported_os.iter().any(|o| o == self.os.as_str()) {
            return Err(SettingsError::Unsupported {
                recipe: recipe_name.to_string(),
                what: "os".to_string(),
                value: self.os.as_str().to_string(),
            });
        }
        if !supported_arch.is_empty() && !supported_arch.iter().any(|a| a == self.arch.as_str()) {
            return Err(SettingsError::Unsupported {
                recipe: recipe_name.to_string(),
                what: "arch".to_string(),
                value: self.arch.as_str().to_string(),
            });
        }
        Ok(())
    }
}
