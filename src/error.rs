//! Error types for pantry
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Recipe definition errors
#[derive(Error, Debug)]
pub enum RecipeError {
    /// Recipe file not found
    #[error("Recipe not found at '{path}'")]
    NotFound { path: PathBuf },

    /// Requested version is not declared in the recipe
    #[error("Version '{version}' not declared for recipe '{recipe}' (known: {known:?})")]
    UnknownVersion {
        recipe: String,
        version: String,
        known: Vec<String>,
    },

    /// Recipe declares no source versions at all
    #[error("Recipe '{recipe}' declares no source versions")]
    NoVersions { recipe: String },

    /// Source recipe without a build section
    #[error("Recipe '{recipe}' has kind 'source' but no [build] section")]
    MissingBuildSection { recipe: String },

    /// Parse error
    #[error("Failed to parse recipe: {0}")]
    ParseError(String),
}

/// Build settings errors
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Unrecognized operating system name
    #[error("Unknown target os '{os}' (expected one of {known:?})")]
    UnknownOs { os: String, known: Vec<String> },

    /// Unrecognized architecture name
    #[error("Unknown target arch '{arch}' (expected one of {known:?})")]
    UnknownArch { arch: String, known: Vec<String> },

    /// Unrecognized build type
    #[error("Unknown build type '{build_type}' (expected Release or Debug)")]
    UnknownBuildType { build_type: String },

    /// Recipe does not support the selected settings
    #[error("Recipe '{recipe}' does not support {what} '{value}'")]
    Unsupported {
        recipe: String,
        what: String,
        value: String,
    },
}

/// Option validation errors
#[derive(Error, Debug)]
pub enum OptionError {
    /// Option not declared by the recipe
    #[error("Option '{name}' is not declared by recipe '{recipe}'")]
    UnknownOption { name: String, recipe: String },

    /// Invalid option type
    #[error("Option '{name}' has invalid type: expected {expected}, got {got}")]
    InvalidType {
        name: String,
        expected: String,
        got: String,
    },

    /// Invalid choice value
    #[error("Option '{name}' has invalid value '{value}': must be one of {choices:?}")]
    InvalidChoice {
        name: String,
        value: String,
        choices: Vec<String>,
    },

    /// Pattern mismatch
    #[error("Option '{name}' value '{value}' does not match pattern '{pattern}'")]
    PatternMismatch {
        name: String,
        value: String,
        pattern: String,
    },

    /// Empty not allowed
    #[error("Option '{name}' cannot be empty")]
    EmptyNotAllowed { name: String },

    /// Out of range
    #[error("Option '{name}' value {value} is out of range (min: {min:?}, max: {max:?})")]
    OutOfRange {
        name: String,
        value: f64,
        min: Option<f64>,
        max: Option<f64>,
    },

    /// Invalid pattern
    #[error("Option '{name}' has invalid pattern '{pattern}': {error}")]
    InvalidPattern {
        name: String,
        pattern: String,
        error: String,
    },

    /// Enabled option the recipe declares unsupported
    #[error("Invalid configuration: option '{name}' is not supported ({reason})")]
    UnsupportedOption { name: String, reason: String },

    /// Malformed -o name=value argument
    #[error("Invalid option argument '{arg}': expected name=value")]
    MalformedArgument { arg: String },
}

/// Download errors
#[derive(Error, Debug)]
pub enum DownloadError {
    /// Network error
    #[error("Network error downloading '{url}': {error}")]
    NetworkError { url: String, error: String },

    /// Checksum verification failed
    #[error("Checksum mismatch for '{file}': expected {expected}, got {actual}")]
    ChecksumMismatch {
        file: String,
        expected: String,
        actual: String,
    },

    /// IO error
    #[error("IO error for '{path}': {error}")]
    IoError { path: PathBuf, error: String },

    /// Max retries exceeded
    #[error("Download failed after {retries} retries: {url}")]
    MaxRetriesExceeded { url: String, retries: u32 },
}

/// Archive extraction errors
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Unsupported archive extension
    #[error("Unsupported archive format: '{path}' (expected .tar.gz, .tgz, .tar.xz, or .tar.zst)")]
    UnsupportedFormat { path: PathBuf },

    /// Failed to open or decode the archive
    #[error("Failed to read archive '{path}': {error}")]
    ReadArchive { path: PathBuf, error: String },

    /// Failed to unpack entries
    #[error("Failed to unpack archive '{path}': {error}")]
    Unpack { path: PathBuf, error: String },

    /// Archive does not contain exactly one top-level directory
    #[error("Archive '{path}' does not extract to a single top-level directory")]
    NoTopLevelDir { path: PathBuf },
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to remove directory
    #[error("Failed to remove directory '{path}': {error}")]
    RemoveDir { path: PathBuf, error: String },

    /// Failed to write file
    #[error("Failed to write file '{path}': {error}")]
    WriteFile { path: PathBuf, error: String },

    /// Failed to read file
    #[error("Failed to read file '{path}': {error}")]
    ReadFile { path: PathBuf, error: String },

    /// Failed to copy file
    #[error("Failed to copy '{from}' to '{to}': {error}")]
    CopyFile {
        from: PathBuf,
        to: PathBuf,
        error: String,
    },

    /// Failed to rename directory
    #[error("Failed to rename '{from}' to '{to}': {error}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        error: String,
    },
}

/// Build step errors
#[derive(Error, Debug)]
pub enum BuildError {
    /// Build tool missing from PATH
    #[error("Build tool not found: {tool}. Install it and ensure it is on PATH")]
    ToolNotFound { tool: String },

    /// Configure or build invocation failed
    #[error("Build failed for recipe '{recipe}': {error}")]
    BuildFailed { recipe: String, error: String },

    /// Sources have not been fetched yet
    #[error("Sources for '{recipe}' not found at '{path}'. Run 'pantry fetch' first")]
    SourcesMissing { recipe: String, path: PathBuf },
}

/// Package step errors
#[derive(Error, Debug)]
pub enum PackageError {
    /// A copy rule matched nothing
    #[error("Copy rule '{src}' -> '{dst}' matched no files for recipe '{recipe}'")]
    EmptyCopyRule {
        recipe: String,
        src: String,
        dst: String,
    },

    /// License file declared but missing
    #[error("License file '{path}' not found for recipe '{recipe}'")]
    LicenseMissing { recipe: String, path: PathBuf },
}

/// Permission-fix errors
///
/// Unreadable files and short reads are absorbed by the classifier itself
/// (treated as Unknown); only walk-level failures surface here.
#[derive(Error, Debug)]
pub enum PermissionsError {
    /// Root directory missing or not a directory
    #[error("Permission fix root '{path}' is not a directory")]
    InvalidRoot { path: PathBuf },
}

/// Top-level pantry error type
#[derive(Error, Debug)]
pub enum PantryError {
    /// Recipe error
    #[error("Recipe error: {0}")]
    Recipe(#[from] RecipeError),

    /// Settings error
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    /// Option error
    #[error("Option error: {0}")]
    Option(#[from] OptionError),

    /// Download error
    #[error("Download error: {0}")]
    Download(#[from] DownloadError),

    /// Extract error
    #[error("Extract error: {0}")]
    Extract(#[from] ExtractError),

    /// Filesystem error
    #[error("Filesystem error: {0}")]
    Filesystem(#[from] FilesystemError),

    /// Build error
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// Package error
    #[error("Package error: {0}")]
    Package(#[from] PackageError),

    /// Permissions error
    #[error("Permissions error: {0}")]
    Permissions(#[from] PermissionsError),

    /// IO error
    #[error("IO error: {source}")]
    Io { source: std::io::Error },

    /// Generic error
    #[error("{0}")]
    Generic(String),
}
