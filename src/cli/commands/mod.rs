//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod build;
pub mod check;
pub mod env;
pub mod fetch;
pub mod fix_perms;
pub mod info;
pub mod package;

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;

use crate::core::settings::{BuildSettings, BuildType, TargetArch, TargetOs};

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download, verify, and extract a recipe's sources
    Fetch {
        /// Recipe directory or recipe.toml path
        #[arg(default_value = ".")]
        recipe: PathBuf,

        /// Version to fetch (newest declared version by default)
        #[arg(long)]
        version: Option<String>,

        /// Force re-download even if a verified archive exists
        #[arg(short, long)]
        force: bool,

        /// Work directory (defaults to the recipe directory)
        #[arg(long)]
        work_dir: Option<PathBuf>,

        /// Override the shared downloads directory
        #[arg(long)]
        downloads_dir: Option<PathBuf>,
    },

    /// Configure and build fetched sources
    Build {
        /// Recipe directory or recipe.toml path
        #[arg(default_value = ".")]
        recipe: PathBuf,

        /// Target operating system (host os by default)
        #[arg(long)]
        os: Option<String>,

        /// Target architecture (host arch by default)
        #[arg(long)]
        arch: Option<String>,

        /// Build type (Release or Debug)
        #[arg(long, default_value = "Release")]
        build_type: String,

        /// Number of parallel jobs
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Option override, repeatable (-o name=value)
        #[arg(short = 'o', long = "option")]
        options: Vec<String>,

        /// Work directory (defaults to the recipe directory)
        #[arg(long)]
        work_dir: Option<PathBuf>,
    },

    /// Copy artifacts into the package layout and fix permissions
    Package {
        /// Recipe directory or recipe.toml path
        #[arg(default_value = ".")]
        recipe: PathBuf,

        /// Work directory (defaults to the recipe directory)
        #[arg(long)]
        work_dir: Option<PathBuf>,
    },

    /// Validate a recipe and configuration without doing any work
    Check {
        /// Recipe directory or recipe.toml path
        #[arg(default_value = ".")]
        recipe: PathBuf,

        /// Target operating system (host os by default)
        #[arg(long)]
        os: Option<String>,

        /// Target architecture (host arch by default)
        #[arg(long)]
        arch: Option<String>,

        /// Build type (Release or Debug)
        #[arg(long, default_value = "Release")]
        build_type: String,

        /// Option override, repeatable (-o name=value)
        #[arg(short = 'o', long = "option")]
        options: Vec<String>,
    },

    /// Show recipe metadata, versions, and options
    Info {
        /// Recipe directory or recipe.toml path
        #[arg(default_value = ".")]
        recipe: PathBuf,
    },

    /// Render the environment the packaged recipe exposes
    Env {
        /// Recipe directory or recipe.toml path
        #[arg(default_value = ".")]
        recipe: PathBuf,

        /// Target operating system (host os by default)
        #[arg(long)]
        os: Option<String>,

        /// Target architecture (host arch by default)
        #[arg(long)]
        arch: Option<String>,

        /// Platform API level for Android driver triplets
        #[arg(long, default_value = "21")]
        api_level: u32,

        /// Package folder the variables point into
        /// (defaults to <work-dir>/package)
        #[arg(long)]
        package_folder: Option<PathBuf>,

        /// Work directory (defaults to the recipe directory)
        #[arg(long)]
        work_dir: Option<PathBuf>,

        /// Print POSIX export lines
        #[arg(long)]
        export: bool,
    },

    /// Fix executable permissions across a packaged tree
    FixPerms {
        /// Directory to walk
        path: PathBuf,
    },
}

impl Commands {
    /// Execute the command
    pub async fn run(self, json: bool) -> Result<()> {
        match self {
            Self::Fetch {
                recipe,
                version,
                force,
                work_dir,
                downloads_dir,
            } => fetch::execute(&recipe, work_dir, version, force, downloads_dir).await,
            Self::Build {
                recipe,
                os,
                arch,
                build_type,
                jobs,
                options,
                work_dir,
            } => {
                let settings =
                    settings_from_args(os.as_deref(), arch.as_deref(), &build_type)?;
                build::execute(&recipe, work_dir, &settings, jobs, &options)
            }
            Self::Package { recipe, work_dir } => package::execute(&recipe, work_dir),
            Self::Check {
                recipe,
                os,
                arch,
                build_type,
                options,
            } => {
                let settings =
                    settings_from_args(os.as_deref(), arch.as_deref(), &build_type)?;
                check::execute(&recipe, &settings, &options)
            }
            Self::Info { recipe } => info::execute(&recipe, json),
            Self::Env {
                recipe,
                os,
                arch,
                api_level,
                package_folder,
                work_dir,
                export,
            } => {
                let settings = settings_from_args(os.as_deref(), arch.as_deref(), "Release")?;
                env::execute(
                    &recipe,
                    &settings,
                    api_level,
                    package_folder,
                    work_dir,
                    export,
                    json,
                )
            }
            Self::FixPerms { path } => fix_perms::execute(&path),
        }
    }
}

/// Build settings from optional CLI strings, defaulting to the host
pub fn settings_from_args(
    os: Option<&str>,
    arch: Option<&str>,
    build_type: &str,
) -> Result<BuildSettings> {
    let host = BuildSettings::host();
    let os = match os {
        Some(value) => TargetOs::parse(value)?,
        None => host.os,
    };
    let arch = match arch {
        Some(value) => TargetArch::parse(value)?,
        None => host.arch,
    };
    Ok(BuildSettings {
        os,
        arch,
        build_type: BuildType::parse(build_type)?,
    })
}

/// Resolve the work directory: explicit flag, else the recipe directory
pub fn resolve_work_dir(recipe_path: &std::path::Path, work_dir: Option<PathBuf>) -> PathBuf {
    work_dir.unwrap_or_else(|| {
        if recipe_path.is_file() {
            recipe_path
                .parent()
                .map(std::path::Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."))
        } else {
            recipe_path.to_path_buf()
        }
    })
}
